// File: botpanel-common/src/models/mod.rs
pub mod activity;
pub mod api;
pub mod bot;
pub mod push;

pub use activity::{ActivityEntry, ActivityKind};
pub use api::{ApiRequest, ApiResponse, Method, TransportResponse};
pub use bot::{BotConfig, StatusReport};
pub use push::PushEvent;
