// File: botpanel-common/src/models/activity.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag for an activity feed entry.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    Auth,
    Comment,
    Upvote,
    Error,
    Start,
    Stop,
    Target,
    #[serde(alias = "dnd")]
    AccessControl,
    Info,
    Success,
    Validation,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Auth => "auth",
            ActivityKind::Comment => "comment",
            ActivityKind::Upvote => "upvote",
            ActivityKind::Error => "error",
            ActivityKind::Start => "start",
            ActivityKind::Stop => "stop",
            ActivityKind::Target => "target",
            ActivityKind::AccessControl => "access-control",
            ActivityKind::Info => "info",
            ActivityKind::Success => "success",
            ActivityKind::Validation => "validation",
        }
    }

    /// Entries that presenters should mark as failures.
    pub fn is_error(&self) -> bool {
        matches!(self, ActivityKind::Error | ActivityKind::Validation)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auth" => Ok(ActivityKind::Auth),
            "comment" => Ok(ActivityKind::Comment),
            "upvote" => Ok(ActivityKind::Upvote),
            "error" => Ok(ActivityKind::Error),
            "start" => Ok(ActivityKind::Start),
            "stop" => Ok(ActivityKind::Stop),
            "target" => Ok(ActivityKind::Target),
            // the dashboard has always called this one "dnd"
            "access-control" | "dnd" => Ok(ActivityKind::AccessControl),
            "info" => Ok(ActivityKind::Info),
            "success" => Ok(ActivityKind::Success),
            "validation" => Ok(ActivityKind::Validation),
            _ => Err(format!("Unknown activity kind: {}", s)),
        }
    }
}

/// One operator-visible event. Fields are private so an entry cannot change
/// after it has been created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActivityEntry {
    kind: ActivityKind,
    title: String,
    description: String,
    timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(kind: ActivityKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::at(kind, title, description, Utc::now())
    }

    pub fn at(
        kind: ActivityKind,
        title: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            timestamp,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip_through_from_str() {
        for kind in [
            ActivityKind::Auth,
            ActivityKind::AccessControl,
            ActivityKind::Validation,
        ] {
            assert_eq!(kind.as_str().parse::<ActivityKind>(), Ok(kind));
        }
        assert_eq!("dnd".parse::<ActivityKind>(), Ok(ActivityKind::AccessControl));
        assert!("bogus".parse::<ActivityKind>().is_err());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ActivityKind::AccessControl).unwrap();
        assert_eq!(json, "\"access-control\"");
    }

    #[test]
    fn serde_and_from_str_accept_the_same_aliases() {
        for name in ["access-control", "dnd"] {
            let from_json: ActivityKind = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(Ok(from_json), name.parse::<ActivityKind>());
        }
    }
}
