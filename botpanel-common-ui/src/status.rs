use std::fmt;
use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, info};

use botpanel_common::models::{PushEvent, StatusReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotStatus {
    Active,
    #[default]
    Inactive,
}

impl BotStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, BotStatus::Active)
    }
}

impl fmt::Display for BotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotStatus::Active => write!(f, "Active"),
            BotStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Which bot controls the operator may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl ControlState {
    const RUNNING: ControlState = ControlState { start_enabled: false, stop_enabled: true };
    const IDLE: ControlState = ControlState { start_enabled: true, stop_enabled: false };
}

impl Default for ControlState {
    fn default() -> Self {
        ControlState::IDLE
    }
}

/// Counters seeded from the startup status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub messages: u64,
    pub subreddits: u64,
}

/// Everything that may move the status cell, from either channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSignal {
    /// Startup status query answered.
    Seeded { authenticated: bool, running: bool },
    /// Startup status query failed.
    SeedFailed,
    /// Authenticate and set-target both succeeded.
    Configured,
    /// Authenticate or set-target failed.
    ConfigureFailed,
    StartSucceeded,
    StartFailed,
    StopSucceeded,
    StopFailed,
    PushAuthSuccess,
    PushBotStarted,
    PushBotStopped,
}

impl StatusSignal {
    /// Push events that carry a transition. `error` and unknown types do not.
    pub fn from_push(event: &PushEvent) -> Option<Self> {
        match event {
            PushEvent::AuthSuccess => Some(StatusSignal::PushAuthSuccess),
            PushEvent::BotStarted => Some(StatusSignal::PushBotStarted),
            PushEvent::BotStopped => Some(StatusSignal::PushBotStopped),
            PushEvent::Error { .. } | PushEvent::Other(_) => None,
        }
    }
}

#[derive(Debug, Default)]
struct StatusCell {
    status: BotStatus,
    controls: ControlState,
    counters: Counters,
}

/// Sole writer of the bot's displayed running state.
///
/// There is no sequence number on either channel, so every signal is taken
/// as authoritative when it is applied: the last one wins.
#[derive(Clone, Default)]
pub struct StatusReconciler {
    cell: Arc<Mutex<StatusCell>>,
}

impl StatusReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, signal: StatusSignal) -> BotStatus {
        let mut cell = self.cell.lock();
        let before = cell.status;

        match signal {
            StatusSignal::Seeded { authenticated, running } => {
                cell.status = if authenticated && running { BotStatus::Active } else { BotStatus::Inactive };
            }
            StatusSignal::SeedFailed
            | StatusSignal::ConfigureFailed
            | StatusSignal::StartFailed => {
                cell.status = BotStatus::Inactive;
            }
            StatusSignal::Configured
            | StatusSignal::StartSucceeded
            | StatusSignal::PushBotStarted => {
                cell.status = BotStatus::Active;
                cell.controls = ControlState::RUNNING;
            }
            StatusSignal::StopSucceeded | StatusSignal::PushBotStopped => {
                cell.status = BotStatus::Inactive;
                cell.controls = ControlState::IDLE;
            }
            // authentication alone says nothing about running
            StatusSignal::PushAuthSuccess => {
                cell.status = BotStatus::Active;
            }
            // real state unknown; keep showing what we had
            StatusSignal::StopFailed => {}
        }

        if cell.status != before {
            info!("Bot status {} -> {} ({:?})", before, cell.status, signal);
        } else {
            debug!("Bot status stays {} ({:?})", cell.status, signal);
        }
        cell.status
    }

    /// Applies the startup status report, counters included.
    pub fn seed(&self, report: &StatusReport) -> BotStatus {
        self.update_counters(report);
        self.apply(StatusSignal::Seeded {
            authenticated: report.authenticated,
            running: report.running,
        })
    }

    /// Replaces the counters only; status and controls are untouched.
    pub fn update_counters(&self, report: &StatusReport) -> Counters {
        let mut cell = self.cell.lock();
        cell.counters = Counters {
            messages: report.messages,
            subreddits: report.subreddits,
        };
        cell.counters
    }

    pub fn status(&self) -> BotStatus {
        self.cell.lock().status
    }

    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }

    pub fn controls(&self) -> ControlState {
        self.cell.lock().controls
    }

    pub fn counters(&self) -> Counters {
        self.cell.lock().counters
    }
}
