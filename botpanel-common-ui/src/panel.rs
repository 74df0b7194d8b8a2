//! The coordinator a front end talks to.
//!
//! `ControlPanel` owns the activity feed, the status cell and the form, and
//! exposes only operations; nothing outside can poke a field directly. It is
//! cheap to clone, so an in-flight call can run on its own task while push
//! events keep being applied.

use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use botpanel_common::models::{ActivityEntry, ActivityKind, ApiResponse, PushEvent, StatusReport};
use botpanel_common::traits::HttpTransport;
use botpanel_common::RequestError;

use crate::activity::{ActivityLog, SharedActivityLog};
use crate::events::{ControlCommand, PanelEvent};
use crate::form::{ConfigForm, FormField};
use crate::gateway::{payload, RequestGateway};
use crate::status::{BotStatus, ControlState, Counters, StatusReconciler, StatusSignal};
use crate::workflow::{SharedForm, SubmissionWorkflow, SubmitError};

/// Read-only view for presenters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub status: BotStatus,
    pub controls: ControlState,
    pub counters: Counters,
    pub flagged_fields: Vec<FormField>,
}

#[derive(Clone)]
pub struct ControlPanel {
    gateway: RequestGateway,
    reconciler: StatusReconciler,
    activity: SharedActivityLog,
    form: SharedForm,
    workflow: SubmissionWorkflow,
}

impl ControlPanel {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        let activity = ActivityLog::shared();
        let reconciler = StatusReconciler::new();
        let gateway = RequestGateway::new(transport, activity.clone());
        let workflow = SubmissionWorkflow::new(gateway.clone(), reconciler.clone(), activity.clone());
        Self {
            gateway,
            reconciler,
            activity,
            form: Arc::new(Mutex::new(ConfigForm::new())),
            workflow,
        }
    }

    /// Seeds status and counters from `GET /api/status`. Runs once, at
    /// startup. A failure leaves the bot shown as inactive; the gateway has
    /// already logged it.
    pub async fn initialize(&self) -> BotStatus {
        match self.gateway.status().await {
            Ok(response) => match read_report(&response) {
                Some(report) => self.reconciler.seed(&report),
                None => self.reconciler.status(),
            },
            Err(_) => self.reconciler.apply(StatusSignal::SeedFailed),
        }
    }

    /// Re-reads the counters from `GET /api/status`. Status and controls are
    /// left as they are, whatever the outcome.
    pub async fn refresh_counters(&self) -> Result<Counters, RequestError> {
        let response = self.gateway.status().await?;
        Ok(match read_report(&response) {
            Some(report) => self.reconciler.update_counters(&report),
            None => self.reconciler.counters(),
        })
    }

    pub fn edit_field(&self, field: FormField, value: impl Into<String>) {
        self.form.lock().edit(field, value);
    }

    pub fn field_value(&self, field: FormField) -> String {
        self.form.lock().value(field).to_string()
    }

    pub async fn submit(&self) -> Result<String, SubmitError> {
        self.workflow.submit(&self.form).await
    }

    pub async fn start(&self) -> Result<(), RequestError> {
        match self.gateway.start().await {
            Ok(_) => {
                self.reconciler.apply(StatusSignal::StartSucceeded);
                self.activity.lock().push(
                    ActivityKind::Start,
                    "Bot Started",
                    "Bot is now running and monitoring the target subreddit",
                );
                Ok(())
            }
            Err(err) => {
                self.reconciler.apply(StatusSignal::StartFailed);
                Err(err)
            }
        }
    }

    pub async fn stop(&self) -> Result<(), RequestError> {
        match self.gateway.stop().await {
            Ok(_) => {
                self.reconciler.apply(StatusSignal::StopSucceeded);
                self.activity
                    .lock()
                    .push(ActivityKind::Stop, "Bot Stopped", "Bot has been stopped successfully");
                Ok(())
            }
            Err(err) => {
                self.reconciler.apply(StatusSignal::StopFailed);
                Err(err)
            }
        }
    }

    /// Runs an operator action to completion. Failures are already in the
    /// activity feed, so only a short summary comes back.
    pub async fn execute(&self, command: ControlCommand) -> Result<String, String> {
        match command {
            ControlCommand::Submit => self
                .submit()
                .await
                .map(|target| format!("configured for r/{}", target))
                .map_err(|e| e.to_string()),
            ControlCommand::Start => self.start().await.map(|_| "started".to_string()).map_err(|e| e.to_string()),
            ControlCommand::Stop => self.stop().await.map(|_| "stopped".to_string()).map_err(|e| e.to_string()),
            ControlCommand::RefreshCounters => self
                .refresh_counters()
                .await
                .map(|c| format!("messages: {}, subreddits: {}", c.messages, c.subreddits))
                .map_err(|e| e.to_string()),
        }
    }

    /// Applies one push-channel event.
    pub fn handle_event(&self, event: PanelEvent) {
        match event {
            PanelEvent::Connected => {
                self.activity
                    .lock()
                    .push(ActivityKind::Info, "Connected", "Real-time updates enabled");
            }
            PanelEvent::Disconnected => {
                self.activity
                    .lock()
                    .push(ActivityKind::Error, "Disconnected", "Real-time updates disabled");
            }
            PanelEvent::Push(PushEvent::Error { error }) => {
                info!("Bot reported error: {}", error);
                self.activity.lock().push(ActivityKind::Error, "Bot Error", error);
            }
            PanelEvent::Push(event) => match StatusSignal::from_push(&event) {
                Some(signal) => {
                    self.reconciler.apply(signal);
                }
                None => debug!("Ignoring push event '{}'", event.event_type()),
            },
        }
    }

    pub fn status(&self) -> BotStatus {
        self.reconciler.status()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            status: self.reconciler.status(),
            controls: self.reconciler.controls(),
            counters: self.reconciler.counters(),
            flagged_fields: self.form.lock().flagged(),
        }
    }

    /// Newest first, at most `limit` entries.
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        self.activity.lock().entries().take(limit).cloned().collect()
    }

    pub fn activity_len(&self) -> usize {
        self.activity.lock().len()
    }

    /// Entries recorded after `mark`, oldest first, plus the mark to pass
    /// next time. Start from 0 to read everything still in the feed.
    pub fn activity_since(&self, mark: u64) -> (u64, Vec<ActivityEntry>) {
        let log = self.activity.lock();
        let mut entries = log.since(mark);
        entries.reverse();
        (log.recorded(), entries)
    }
}

fn read_report(response: &ApiResponse) -> Option<StatusReport> {
    match payload(response).map(|data| serde_json::from_value::<StatusReport>(data.clone())) {
        Some(Ok(report)) => Some(report),
        Some(Err(e)) => {
            warn!("Unreadable status payload: {}", e);
            None
        }
        None => {
            debug!("Status response carried no data");
            None
        }
    }
}
