pub mod activity;
pub mod config;
pub mod events;
pub mod form;
pub mod gateway;
pub mod panel;
pub mod push;
pub mod status;
pub mod transport;
pub mod workflow;

pub use activity::{ActivityLog, SharedActivityLog, MAX_ACTIVITY_ENTRIES};
pub use config::PanelConfig;
pub use events::{ControlCommand, PanelEvent};
pub use form::{ConfigForm, FormField};
pub use gateway::{ApiCall, RequestGateway, RequestOutcome};
pub use panel::{ControlPanel, PanelSnapshot};
pub use push::PushClient;
pub use status::{BotStatus, ControlState, Counters, StatusReconciler, StatusSignal};
pub use transport::DefaultHttpTransport;
pub use workflow::{SubmissionWorkflow, SubmitError};

use anyhow::Result;
use botpanel_common::models::ActivityEntry;

// Trait for different rendering backends
pub trait PanelRenderer {
    fn render_activity(&mut self, entries: &[ActivityEntry]) -> Result<()>;
    fn render_status(&mut self, snapshot: &PanelSnapshot) -> Result<()>;
}
