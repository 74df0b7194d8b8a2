use botpanel_common::models::PushEvent;

/// Everything the push channel hands to the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Connected,
    Disconnected,
    Push(PushEvent),
}

/// Operator actions, as queued by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Submit,
    Start,
    Stop,
    /// Re-reads the counters; the bot status is left alone.
    RefreshCounters,
}
