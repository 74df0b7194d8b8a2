//! Outbound calls to the bot-control service.
//!
//! `RequestGateway` turns whatever the transport hands back into a
//! [`RequestOutcome`] and writes the matching activity entries: one `error`
//! entry for every failure, and one entry of the caller-declared kind when a
//! successful response carries a `log` line.

use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, warn};

use botpanel_common::error::DEFAULT_REQUEST_FAILURE;
use botpanel_common::models::{ActivityKind, ApiRequest, ApiResponse, BotConfig};
use botpanel_common::traits::HttpTransport;
use botpanel_common::RequestError;

use crate::activity::SharedActivityLog;

pub type RequestOutcome = Result<ApiResponse, RequestError>;

pub const FAILURE_TITLE: &str = "Request Failed";

/// A request plus the activity kind its `log` line should be filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub request: ApiRequest,
    pub log_kind: ActivityKind,
}

impl ApiCall {
    pub fn new(request: ApiRequest) -> Self {
        Self { request, log_kind: ActivityKind::Info }
    }

    pub fn log_as(mut self, kind: ActivityKind) -> Self {
        self.log_kind = kind;
        self
    }

    pub fn authenticate(config: &BotConfig) -> Result<Self, RequestError> {
        let body = serde_json::to_value(config).map_err(|e| RequestError::new(e.to_string()))?;
        Ok(Self::new(ApiRequest::post("/api/authenticate").with_body(body)).log_as(ActivityKind::Auth))
    }

    pub fn set_target(config: &BotConfig) -> Self {
        Self::new(ApiRequest::post("/api/set-target").with_body(config.target_body()))
    }

    pub fn start() -> Self {
        Self::new(ApiRequest::post("/api/start")).log_as(ActivityKind::Start)
    }

    pub fn stop() -> Self {
        Self::new(ApiRequest::post("/api/stop")).log_as(ActivityKind::Stop)
    }

    pub fn status() -> Self {
        Self::new(ApiRequest::get("/api/status"))
    }
}

#[derive(Clone)]
pub struct RequestGateway {
    transport: Arc<dyn HttpTransport>,
    activity: SharedActivityLog,
}

impl RequestGateway {
    pub fn new(transport: Arc<dyn HttpTransport>, activity: SharedActivityLog) -> Self {
        Self { transport, activity }
    }

    /// Makes exactly one attempt. The outcome is returned whatever it is;
    /// deciding what it means for bot state is the caller's business.
    pub async fn call(&self, call: ApiCall) -> RequestOutcome {
        let ApiCall { request, log_kind } = call;
        let label = format!("{} {}", request.method, request.path);

        let outcome = match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                serde_json::from_str::<ApiResponse>(&response.body)
                    .map_err(|e| RequestError::new(format!("Invalid response from server: {}", e)))
            }
            Ok(response) => {
                // Error bodies may carry a log line too; only the message is shown.
                let message = serde_json::from_str::<ApiResponse>(&response.body)
                    .ok()
                    .and_then(|body| body.message)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REQUEST_FAILURE.to_string());
                debug!("{} answered {}", label, response.status);
                Err(RequestError::new(message))
            }
            Err(e) => Err(RequestError::from(e)),
        };

        match &outcome {
            Ok(body) => {
                if let Some(log) = &body.log {
                    let title = body.message.clone().unwrap_or_default();
                    self.activity.lock().push(log_kind, title, log.clone());
                }
                debug!("{} succeeded", label);
            }
            Err(err) => {
                warn!("{} failed: {}", label, err);
                self.activity
                    .lock()
                    .push(ActivityKind::Error, FAILURE_TITLE, err.message.clone());
            }
        }
        outcome
    }

    pub async fn authenticate(&self, config: &BotConfig) -> RequestOutcome {
        let call = match ApiCall::authenticate(config) {
            Ok(call) => call,
            Err(err) => {
                self.activity
                    .lock()
                    .push(ActivityKind::Error, FAILURE_TITLE, err.message.clone());
                return Err(err);
            }
        };
        self.call(call).await
    }

    pub async fn set_target(&self, config: &BotConfig) -> RequestOutcome {
        self.call(ApiCall::set_target(config)).await
    }

    pub async fn start(&self) -> RequestOutcome {
        self.call(ApiCall::start()).await
    }

    pub async fn stop(&self) -> RequestOutcome {
        self.call(ApiCall::stop()).await
    }

    pub async fn status(&self) -> RequestOutcome {
        self.call(ApiCall::status()).await
    }
}

/// Pulls the `data` payload out of a successful response, if any.
pub fn payload(response: &ApiResponse) -> Option<&Value> {
    response.data.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use botpanel_common::models::{Method, TransportResponse};
    use botpanel_common::traits::MockHttpTransport;
    use botpanel_common::Error;
    use serde_json::json;

    use crate::activity::ActivityLog;

    fn gateway_with(mock: MockHttpTransport) -> (RequestGateway, SharedActivityLog) {
        let activity = ActivityLog::shared();
        (RequestGateway::new(Arc::new(mock), activity.clone()), activity)
    }

    #[tokio::test]
    async fn success_with_log_records_entry_of_declared_kind() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .withf(|req: &ApiRequest| req.method == Method::Post && req.path == "/api/start" && req.body.is_none())
            .times(1)
            .returning(|_| {
                Ok(TransportResponse::new(
                    200,
                    json!({"status": "success", "message": "Bot started successfully", "log": "[12:00:00] Start Bot - SUCCESS"}).to_string(),
                ))
            });
        let (gateway, activity) = gateway_with(mock);

        let outcome = gateway.start().await.unwrap();
        assert_eq!(outcome.message.as_deref(), Some("Bot started successfully"));

        let log = activity.lock();
        assert_eq!(log.len(), 1);
        let entry = log.latest().unwrap();
        assert_eq!(entry.kind(), ActivityKind::Start);
        assert_eq!(entry.title(), "Bot started successfully");
        assert_eq!(entry.description(), "[12:00:00] Start Bot - SUCCESS");
    }

    #[tokio::test]
    async fn kind_comes_from_the_call_not_the_path() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .returning(|_| Ok(TransportResponse::new(200, r#"{"message":"ok","log":"line"}"#)));
        let (gateway, activity) = gateway_with(mock);

        // a path that mentions "start" but is declared as a target call
        let call = ApiCall::new(ApiRequest::post("/api/restart-target")).log_as(ActivityKind::Target);
        gateway.call(call).await.unwrap();
        assert_eq!(activity.lock().latest().unwrap().kind(), ActivityKind::Target);
    }

    #[tokio::test]
    async fn silent_success_records_nothing() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send().returning(|_| {
            Ok(TransportResponse::new(
                200,
                json!({"status": "success", "data": {"authenticated": false, "running": false}}).to_string(),
            ))
        });
        let (gateway, activity) = gateway_with(mock);

        let outcome = gateway.status().await.unwrap();
        assert!(payload(&outcome).is_some());
        assert!(activity.lock().is_empty());
    }

    #[tokio::test]
    async fn non_success_uses_server_message() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send().returning(|_| {
            Ok(TransportResponse::new(
                401,
                json!({"status": "error", "message": "Not authenticated", "log": "[..] Stop Bot - ERROR"}).to_string(),
            ))
        });
        let (gateway, activity) = gateway_with(mock);

        let err = gateway.stop().await.unwrap_err();
        assert_eq!(err.message, "Not authenticated");

        let log = activity.lock();
        assert_eq!(log.len(), 1);
        let entry = log.latest().unwrap();
        assert_eq!(entry.kind(), ActivityKind::Error);
        assert_eq!(entry.title(), FAILURE_TITLE);
        assert_eq!(entry.description(), "Not authenticated");
    }

    #[tokio::test]
    async fn non_success_without_message_falls_back_to_default() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .returning(|_| Ok(TransportResponse::new(502, "<html>bad gateway</html>")));
        let (gateway, activity) = gateway_with(mock);

        let err = gateway.start().await.unwrap_err();
        assert_eq!(err.message, DEFAULT_REQUEST_FAILURE);
        assert_eq!(activity.lock().count_of(ActivityKind::Error), 1);
    }

    #[tokio::test]
    async fn transport_error_becomes_failed_outcome() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(Error::Protocol("connection refused".into())));
        let (gateway, activity) = gateway_with(mock);

        let err = gateway.status().await.unwrap_err();
        assert!(err.message.contains("connection refused"));
        assert_eq!(activity.lock().count_of(ActivityKind::Error), 1);
    }

    #[tokio::test]
    async fn authenticate_sends_full_config() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .withf(|req: &ApiRequest| {
                req.path == "/api/authenticate"
                    && req.body.as_ref().map(|b| b["client_secret"] == "shh").unwrap_or(false)
            })
            .times(1)
            .returning(|_| Ok(TransportResponse::new(200, r#"{"message":"Authentication successful"}"#)));
        let (gateway, _activity) = gateway_with(mock);

        let config = BotConfig {
            subreddit: "rust".into(),
            username: "ferris".into(),
            password: "pw".into(),
            client_id: "cid".into(),
            client_secret: "shh".into(),
        };
        assert!(gateway.authenticate(&config).await.is_ok());
    }
}
