// File: botpanel-common/src/traits/transport_traits.rs

use async_trait::async_trait;
use crate::error::Error;
use crate::models::api::{ApiRequest, TransportResponse};

/// Sends one request to the bot-control service.
///
/// Implementations make exactly one attempt and never retry. A non-success
/// status is *not* an error at this level; it comes back as a
/// `TransportResponse` so the caller can read the server's message.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, Error>;
}
