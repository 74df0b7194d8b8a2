// File: botpanel-common/src/models/bot.rs

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Credentials and target for one submission. Built only from a validated
/// form and dropped as soon as the submission finishes.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub subreddit: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl BotConfig {
    /// Body for `/api/set-target`.
    pub fn target_body(&self) -> Value {
        json!({ "subreddit": self.subreddit })
    }
}

// Keep secrets out of logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("subreddit", &self.subreddit)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// `data` object of `GET /api/status`.
///
/// Missing, null or mistyped fields read as `false`/`0` so that a bad
/// counter can never keep the status from being seeded.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusReport {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub authenticated: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub running: bool,
    #[serde(default, deserialize_with = "lenient_count")]
    pub messages: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub subreddits: u64,
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64().unwrap_or(0))
}

impl StatusReport {
    pub fn is_active(&self) -> bool {
        self.authenticated && self.running
    }
}
