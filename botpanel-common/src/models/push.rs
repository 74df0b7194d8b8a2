// File: botpanel-common/src/models/push.rs

use serde::Deserialize;
use serde_json::Value;
use crate::error::Error;

/// A `bot_update` event delivered over the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    AuthSuccess,
    BotStarted,
    BotStopped,
    /// The bot reported an operational error.
    Error { error: String },
    /// Any event type the panel does not act on (the server's `status`
    /// greeting, for one).
    Other(String),
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Value,
}

impl PushEvent {
    /// Parses one text frame of the form `{"type": "...", "data": {...}}`.
    pub fn from_frame(text: &str) -> Result<Self, Error> {
        let raw: RawFrame = serde_json::from_str(text)?;
        let event = match raw.event_type.as_str() {
            "auth_success" => PushEvent::AuthSuccess,
            "bot_started" => PushEvent::BotStarted,
            "bot_stopped" => PushEvent::BotStopped,
            "error" => {
                let error = raw
                    .data
                    .get("error")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown bot error")
                    .to_string();
                PushEvent::Error { error }
            }
            other => PushEvent::Other(other.to_string()),
        };
        Ok(event)
    }

    pub fn event_type(&self) -> &str {
        match self {
            PushEvent::AuthSuccess => "auth_success",
            PushEvent::BotStarted => "bot_started",
            PushEvent::BotStopped => "bot_stopped",
            PushEvent::Error { .. } => "error",
            PushEvent::Other(name) => name,
        }
    }
}
