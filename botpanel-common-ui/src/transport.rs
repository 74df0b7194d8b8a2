//! reqwest-backed `HttpTransport` used against the real bot-control service.
//!
//! Every request declares `Content-Type: application/json`, whether or not it
//! carries a body. No timeout is configured: a call that never answers simply
//! never resolves.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use botpanel_common::models::{ApiRequest, Method, TransportResponse};
use botpanel_common::traits::HttpTransport;
use botpanel_common::Error;

#[derive(Clone)]
pub struct DefaultHttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl DefaultHttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, Error> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for DefaultHttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, Error> {
        let url = self.base_url.join(&request.path)?;
        debug!("{} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let mut builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
