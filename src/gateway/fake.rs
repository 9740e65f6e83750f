//! In-memory gateway for tests.

use crate::error::{Result, TryOnError};
use crate::gateway::provider::Gateway;
use crate::gateway::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Reply = Box<dyn Fn() -> Result<ChatResponse> + Send + Sync>;

/// Gateway that answers from a script and records what it was sent.
pub(crate) struct ScriptedGateway {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedGateway {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Answers 2xx with a generated image.
    pub(crate) fn with_image(url: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{"message": {"images": [{"image_url": {"url": url}}]}}]
        });
        Self::new(Box::new(move || -> Result<ChatResponse> {
            Ok(serde_json::from_value(body.clone())?)
        }))
    }

    /// Answers 2xx with text only.
    pub(crate) fn without_image() -> Self {
        let body = serde_json::json!({
            "choices": [{"message": {"content": "I can't do that"}}]
        });
        Self::new(Box::new(move || -> Result<ChatResponse> {
            Ok(serde_json::from_value(body.clone())?)
        }))
    }

    /// Fails the way a non-success upstream status would.
    pub(crate) fn with_status(status: u16) -> Self {
        Self::new(Box::new(move || -> Result<ChatResponse> {
            Err(match status {
                429 => TryOnError::RateLimited { retry_after: None },
                402 => TryOnError::UsageLimit("Payment required".into()),
                _ => TryOnError::Api {
                    status,
                    message: "upstream failure".into(),
                },
            })
        }))
    }

    /// Fails with an arbitrary error.
    pub(crate) fn failing(make: impl Fn() -> TryOnError + Send + Sync + 'static) -> Self {
        Self::new(Box::new(move || -> Result<ChatResponse> { Err(make()) }))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        (self.reply)()
    }

    fn model(&self) -> &str {
        "test/model"
    }
}
