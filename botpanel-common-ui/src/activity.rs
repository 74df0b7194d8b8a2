use std::collections::VecDeque;
use std::sync::Arc;
use parking_lot::Mutex;
use botpanel_common::models::{ActivityEntry, ActivityKind};

/// Most entries the feed ever holds.
pub const MAX_ACTIVITY_ENTRIES: usize = 50;

/// Handle shared by every writer of the feed.
pub type SharedActivityLog = Arc<Mutex<ActivityLog>>;

/// Bounded newest-first feed of operator-visible events.
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    max_entries: usize,
    // entries ever recorded, evicted ones included
    recorded: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ACTIVITY_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries + 1),
            max_entries,
            recorded: 0,
        }
    }

    pub fn shared() -> SharedActivityLog {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn record(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.recorded += 1;

        // Evict from the tail, oldest first
        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// Shorthand for `record(ActivityEntry::new(..))`.
    pub fn push(&mut self, kind: ActivityKind, title: impl Into<String>, description: impl Into<String>) {
        self.record(ActivityEntry::new(kind, title, description));
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of `record` calls so far. Never decreases.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Entries recorded after the `recorded()` value `mark`, newest first.
    /// Ones already evicted are gone.
    pub fn since(&self, mark: u64) -> Vec<ActivityEntry> {
        let fresh = self.recorded.saturating_sub(mark).min(self.entries.len() as u64) as usize;
        self.entries.iter().take(fresh).cloned().collect()
    }

    pub fn count_of(&self, kind: ActivityKind) -> usize {
        self.entries.iter().filter(|e| e.kind() == kind).count()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}
