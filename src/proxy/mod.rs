//! The try-on proxy: validates a request, forwards it to the gateway once,
//! and classifies what came back.

mod outcome;
#[cfg(feature = "server")]
mod router;

pub use outcome::{
    OutcomeBody, TryOnOutcome, FALLBACK_MESSAGE, MISSING_IMAGES_MESSAGE, RATE_LIMITED_MESSAGE,
    SUCCESS_MESSAGE, UNEXPECTED_MESSAGE, USAGE_LIMITED_MESSAGE,
};
#[cfg(feature = "server")]
pub use router::router;

use crate::gateway::{ChatRequest, Gateway, API_KEY_ENV};
use crate::wire::TryOnRequest;
use std::sync::Arc;

/// Shared, immutable state of the proxy.
///
/// The gateway is absent when no API key was configured; every request that
/// gets past validation then fails with a config fault.
#[derive(Clone)]
pub struct ProxyState {
    gateway: Option<Arc<dyn Gateway>>,
}

impl ProxyState {
    /// Creates state backed by a gateway.
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    /// Creates state with no gateway credential.
    pub fn unconfigured() -> Self {
        Self { gateway: None }
    }

    /// Returns true if a gateway is configured.
    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    /// Handles one raw request body.
    pub async fn handle(&self, body: &[u8]) -> TryOnOutcome {
        let request: TryOnRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("Error in virtual-tryon request: {e}");
                return TryOnOutcome::Fault(e.to_string());
            }
        };
        self.process(&request).await
    }

    /// Runs one decoded request through validation, the gateway, and
    /// classification.
    pub async fn process(&self, request: &TryOnRequest) -> TryOnOutcome {
        let Some((person_image, clothing_image)) = request.images() else {
            tracing::warn!("rejecting try-on request with a missing image");
            return TryOnOutcome::Validation(MISSING_IMAGES_MESSAGE.to_string());
        };

        let Some(gateway) = self.gateway.as_deref() else {
            let msg = format!("{API_KEY_ENV} is not configured");
            tracing::error!("Error in virtual-tryon request: {msg}");
            return TryOnOutcome::Config(msg);
        };

        tracing::info!(
            person_bytes = person_image.len(),
            clothing_bytes = clothing_image.len(),
            "Starting virtual try-on generation"
        );

        let chat = ChatRequest::try_on(gateway.model(), person_image, clothing_image);
        let response = match gateway.complete(&chat).await {
            Ok(response) => response,
            Err(e) => {
                let outcome = TryOnOutcome::from_error(e);
                tracing::warn!(status = outcome.status(), "virtual try-on failed: {outcome:?}");
                return outcome;
            }
        };

        match response.first_image() {
            Some(image) => {
                tracing::info!("Virtual try-on generated successfully");
                TryOnOutcome::Success {
                    result_image: image.to_string(),
                }
            }
            None => {
                tracing::warn!(
                    text = response.first_text().unwrap_or_default(),
                    "No image in response, using fallback"
                );
                TryOnOutcome::SoftFallback {
                    person_image: person_image.to_string(),
                }
            }
        }
    }
}
