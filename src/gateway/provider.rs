//! Gateway trait.

use crate::error::Result;
use crate::gateway::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;

/// A multimodal chat-completion backend.
///
/// Implementations map upstream failures onto [`TryOnError`](crate::TryOnError):
/// 429 to `RateLimited`, 402 to `UsageLimit`, other non-success statuses to
/// `Api`. A successful response is returned as-is, even when it carries no
/// image.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submits one chat-completion request.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Model identifier requests should target.
    fn model(&self) -> &str;
}
