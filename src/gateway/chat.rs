//! Chat-completions gateway over HTTP.

use crate::error::{parse_retry_after, sanitize_error_message, Result, TryOnError};
use crate::gateway::provider::Gateway;
use crate::gateway::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::time::Instant;

/// Default chat-completions endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Default image-capable model.
pub const DEFAULT_MODEL: &str = "google/gemini-3-pro-image-preview";

/// Environment variable holding the gateway API key.
pub const API_KEY_ENV: &str = "LOVABLE_API_KEY";

/// Builder for ChatGateway.
#[derive(Debug, Clone, Default)]
pub struct ChatGatewayBuilder {
    api_key: Option<String>,
    url: Option<String>,
    model: Option<String>,
}

impl ChatGatewayBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `LOVABLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the chat-completions URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builds the gateway, resolving the API key.
    ///
    /// A missing key is a [`TryOnError::Config`].
    pub fn build(self) -> Result<ChatGateway> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .ok_or_else(|| TryOnError::Config(format!("{API_KEY_ENV} is not configured")))?;

        Ok(ChatGateway {
            client: reqwest::Client::new(),
            api_key,
            url: self.url.unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Gateway client speaking OpenAI-style chat completions.
pub struct ChatGateway {
    client: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
}

impl ChatGateway {
    /// Creates a new `ChatGatewayBuilder`.
    pub fn builder() -> ChatGatewayBuilder {
        ChatGatewayBuilder::new()
    }

    /// Endpoint this gateway posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn complete_impl(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %sanitize_error_message(&text), "AI gateway error");
            return Err(parse_error(status.as_u16(), &text, &headers));
        }

        let body = decode_response(&response.bytes().await?)?;
        tracing::info!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis() as u64,
            "AI response received"
        );
        Ok(body)
    }
}

/// Parses a 2xx gateway body. Only a body that is not JSON at all fails.
fn decode_response(body: &[u8]) -> Result<ChatResponse> {
    Ok(serde_json::from_slice(body)?)
}

/// Maps a non-success gateway status onto the error taxonomy.
fn parse_error(status: u16, text: &str, headers: &reqwest::header::HeaderMap) -> TryOnError {
    let text = sanitize_error_message(text);
    match status {
        429 => TryOnError::RateLimited {
            retry_after: parse_retry_after(headers).map(std::time::Duration::from_secs),
        },
        402 => TryOnError::UsageLimit(text),
        _ => TryOnError::Api {
            status,
            message: text,
        },
    }
}

#[async_trait]
impl Gateway for ChatGateway {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.complete_impl(request).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_with_explicit_key() {
        let gateway = ChatGatewayBuilder::new()
            .api_key("test-key")
            .model("some/model")
            .url("http://localhost:9/v1/chat/completions")
            .build()
            .unwrap();
        assert_eq!(gateway.model(), "some/model");
        assert_eq!(gateway.url(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn test_builder_defaults() {
        let gateway = ChatGateway::builder().api_key("k").build().unwrap();
        assert_eq!(gateway.model(), DEFAULT_MODEL);
        assert_eq!(gateway.url(), DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn test_parse_error_rate_limited() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::RETRY_AFTER, "12".parse().unwrap());
        match parse_error(429, "slow down", &headers) {
            TryOnError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(12)))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_usage_limit() {
        let headers = reqwest::header::HeaderMap::new();
        let err = parse_error(402, "Payment required", &headers);
        assert!(matches!(err, TryOnError::UsageLimit(ref m) if m == "Payment required"));
    }

    #[test]
    fn test_parse_error_generic() {
        let headers = reqwest::header::HeaderMap::new();
        for status in [400, 401, 404, 500, 503] {
            let err = parse_error(status, "<html>\n  oops\n</html>", &headers);
            match err {
                TryOnError::Api { status: s, message } => {
                    assert_eq!(s, status);
                    assert_eq!(message, "<html> oops </html>");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_response_without_usable_image() {
        for body in [
            r#"{"choices": [{"message": {"images": [{"image_url": {}}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": {"url": null}}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": "data:image/png;base64,AAAA"}]}}]}"#,
        ] {
            let response = decode_response(body.as_bytes()).unwrap();
            assert_eq!(response.first_image(), None, "body: {body}");
        }
    }

    #[test]
    fn test_decode_response_rejects_non_json() {
        let err = decode_response(b"<html>upstream</html>").unwrap_err();
        assert!(matches!(err, TryOnError::Json(_)));
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_malformed_image_entry_falls_back_through_proxy() {
        use crate::proxy::{ProxyState, TryOnOutcome};
        use crate::wire::TryOnRequest;
        use std::sync::Arc;

        for body in [
            serde_json::json!({"choices": [{"message": {"images": [{"image_url": {}}]}}]}),
            serde_json::json!({"choices": [{"message": {"images": [{"image_url": {"url": null}}]}}]}),
            serde_json::json!({"choices": [{"message": {"images": [{"image_url": "data:image/png;base64,AAAA"}]}}]}),
        ] {
            let shown = body.to_string();
            let upstream = axum::Router::new().route(
                "/v1/chat/completions",
                axum::routing::post(move || async move { axum::Json(body) }),
            );
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, upstream).await.unwrap() });

            let gateway = ChatGateway {
                client: reqwest::Client::builder().no_proxy().build().unwrap(),
                api_key: "test-key".into(),
                url: format!("http://{addr}/v1/chat/completions"),
                model: DEFAULT_MODEL.into(),
            };
            let outcome = ProxyState::new(Arc::new(gateway))
                .process(&TryOnRequest::new("data:person", "data:shirt"))
                .await;

            assert_eq!(
                outcome,
                TryOnOutcome::SoftFallback {
                    person_image: "data:person".into()
                },
                "body: {shown}"
            );
        }
    }
}
