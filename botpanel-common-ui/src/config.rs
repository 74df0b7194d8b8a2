use std::time::Duration;
use url::Url;

use botpanel_common::Error;

pub const API_URL_VAR: &str = "BOTPANEL_API_URL";
pub const PUSH_URL_VAR: &str = "BOTPANEL_PUSH_URL";
pub const RECONNECT_VAR: &str = "BOTPANEL_RECONNECT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PUSH_URL: &str = "ws://localhost:8000/ws";
const DEFAULT_RECONNECT_SECS: u64 = 5;

/// Where the panel talks to, and how patiently it reconnects.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub api_url: Url,
    pub push_url: Url,
    pub reconnect_delay: Duration,
}

impl PanelConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let push_url = lookup(PUSH_URL_VAR).unwrap_or_else(|| DEFAULT_PUSH_URL.to_string());
        let reconnect_secs = match lookup(RECONNECT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", RECONNECT_VAR, raw, e)))?,
            None => DEFAULT_RECONNECT_SECS,
        };

        Self::new(&api_url, &push_url, Duration::from_secs(reconnect_secs))
    }

    pub fn new(api_url: &str, push_url: &str, reconnect_delay: Duration) -> Result<Self, Error> {
        let api_url = Url::parse(api_url)?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!("API URL must be http(s): {}", api_url)));
        }
        let push_url = Url::parse(push_url)?;
        if !matches!(push_url.scheme(), "ws" | "wss") {
            return Err(Error::Config(format!("push URL must be ws(s): {}", push_url)));
        }
        Ok(Self { api_url, push_url, reconnect_delay })
    }
}
