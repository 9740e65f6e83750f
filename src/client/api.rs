//! Calling the proxy endpoint from the client.

use crate::error::{Result, TryOnError};
use crate::wire::{ProxyReply, TryOnRequest};
use async_trait::async_trait;

/// Default proxy endpoint for a locally running server.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/virtual-tryon";

/// A successful proxy answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Result image, when the proxy sent one.
    pub result_image: Option<String>,
}

/// Something that can run a try-on for the client.
#[async_trait]
pub trait TryOnApi: Send + Sync {
    /// Requests a try-on. An `error` field in a 2xx body is returned as
    /// [`TryOnError::Proxy`].
    async fn invoke(&self, person_image: &str, clothing_image: &str) -> Result<Generated>;
}

/// [`TryOnApi`] over HTTP.
pub struct HttpTryOnApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTryOnApi {
    /// Creates a client posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpTryOnApi {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl TryOnApi for HttpTryOnApi {
    async fn invoke(&self, person_image: &str, clothing_image: &str) -> Result<Generated> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TryOnRequest::new(person_image, clothing_image))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        interpret_reply(status.as_u16(), &text)
    }
}

/// Turns a proxy status and body into the client's view of the outcome.
fn interpret_reply(status: u16, text: &str) -> Result<Generated> {
    let parsed = serde_json::from_str::<ProxyReply>(text);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("Proxy returned status {status}"));
        return Err(TryOnError::Proxy(message));
    }

    let reply = parsed?;
    if let Some(error) = reply.error.filter(|e| !e.is_empty()) {
        return Err(TryOnError::Proxy(error));
    }
    Ok(Generated {
        result_image: reply.result_image.filter(|r| !r.is_empty()),
    })
}
