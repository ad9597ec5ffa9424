//! HTTP delivery of event payloads
//!
//! No retry loop anywhere here: a record gets exactly one attempt. The
//! original runs inside third-party pages, so the guarded [`Transport::send`]
//! swallows every outcome; [`Transport::deliver`] keeps the typed error so
//! tests can tell a 500 from a refused connection.

use std::time::Duration;

use beacon_core::{fail_open::fail_open_async, BeaconError, CollectorConfig, Result, WirePayload};
use tracing::debug;

/// Delivery client for the collection endpoint
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout_ms: u64,
}

impl Transport {
    /// Create a transport for an endpoint
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_ms: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
            timeout_ms,
        }
    }

    /// Create a transport from collector configuration
    pub fn from_config(config: &CollectorConfig) -> Self {
        Self::new(&config.endpoint, config.api_key.clone(), config.timeout_ms)
    }

    /// Deliver a payload, classifying the outcome
    ///
    /// Issues a single POST with `Accept: */*`, `Content-Type:
    /// application/json`, and `Authorization: Bearer <key>` when a key is
    /// configured. The request is aborted after the configured timeout.
    pub async fn deliver(&self, payload: &WirePayload) -> Result<()> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(Duration::from_millis(self.timeout_ms))
            .header("accept", "*/*")
            .header("content-type", "application/json");

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.json(payload).send().await.map_err(|e| {
            if e.is_timeout() {
                BeaconError::Timeout(self.timeout_ms)
            } else if e.is_builder() {
                BeaconError::RequestBuild(e.to_string())
            } else {
                BeaconError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BeaconError::Status(status.as_u16()));
        }

        debug!(
            "Delivered {} event for session {}",
            payload.action, payload.session_id
        );
        Ok(())
    }

    /// Fire-and-forget delivery
    ///
    /// The record is not recoverable once this returns, whatever happened on
    /// the wire.
    pub async fn send(&self, payload: WirePayload) {
        fail_open_async("transport.deliver", || self.deliver(&payload)).await;
    }
}
