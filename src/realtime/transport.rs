use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors from a push transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Push endpoint returned status {0}")]
    BadStatus(u16),
}

/// Delivery boundary for realtime events. Implementations are best-effort:
/// the broadcaster logs and drops any error they return.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn send(&self, channel: &str, event: &str, payload: &Value) -> Result<(), TransportError>;
}

/// Pusher-style HTTP transport: POSTs each event to `{endpoint}/events`
/// with a bearer api key.
pub struct HttpPushTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpPushTransport {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl NotificationTransport for HttpPushTransport {
    async fn send(&self, channel: &str, event: &str, payload: &Value) -> Result<(), TransportError> {
        let url = format!("{}/events", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "channel": channel,
                "name": event,
                "data": payload,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::BadStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Transport used when no push endpoint is configured. Accepts everything.
pub struct NoopTransport;

#[async_trait]
impl NotificationTransport for NoopTransport {
    async fn send(
        &self,
        _channel: &str,
        _event: &str,
        _payload: &Value,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}
