//! Classified result of one proxy request.

use crate::error::TryOnError;
use crate::wire::{ErrorReply, TryOnReply};
use serde::Serialize;

/// Reported when either image is missing.
pub const MISSING_IMAGES_MESSAGE: &str = "Both person image and clothing image are required";
/// Reported when the gateway answers 429.
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";
/// Reported when the gateway answers 402.
pub const USAGE_LIMITED_MESSAGE: &str = "Usage limit reached. Please add credits to continue.";
/// Sent with a generated image.
pub const SUCCESS_MESSAGE: &str = "Virtual try-on completed successfully";
/// Sent when the gateway produced no image and the person image is echoed.
pub const FALLBACK_MESSAGE: &str = "Virtual try-on completed";
/// Reported for faults that carry no message.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Every way a try-on request can end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryOnOutcome {
    /// Required input missing; the gateway was not contacted.
    Validation(String),
    /// Deployment precondition missing (API key).
    Config(String),
    /// Gateway answered 429.
    RateLimited,
    /// Gateway answered 402.
    UsageLimited,
    /// Gateway answered another non-success status.
    GatewayError {
        /// Upstream HTTP status.
        status: u16,
    },
    /// Gateway succeeded without an image; the person image is returned.
    SoftFallback {
        /// Person image from the request.
        person_image: String,
    },
    /// Gateway produced an image.
    Success {
        /// Generated image.
        result_image: String,
    },
    /// Anything else.
    Fault(String),
}

/// Response body for an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutcomeBody {
    /// `{resultImage, message}`
    Reply(TryOnReply),
    /// `{error}`
    Error(ErrorReply),
}

impl TryOnOutcome {
    /// Classifies an error raised while handling a request.
    pub fn from_error(err: TryOnError) -> Self {
        match err {
            TryOnError::Config(msg) => Self::Config(msg),
            TryOnError::RateLimited { .. } => Self::RateLimited,
            TryOnError::UsageLimit(_) => Self::UsageLimited,
            TryOnError::Api { status, .. } => Self::GatewayError { status },
            other => Self::Fault(other.to_string()),
        }
    }

    /// HTTP status code for this outcome.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::UsageLimited => 402,
            Self::RateLimited => 429,
            Self::Config(_) | Self::GatewayError { .. } | Self::Fault(_) => 500,
            Self::SoftFallback { .. } | Self::Success { .. } => 200,
        }
    }

    /// Returns true for outcomes that answer 200.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::SoftFallback { .. } | Self::Success { .. })
    }

    /// Converts into the JSON body sent to the client.
    pub fn into_body(self) -> OutcomeBody {
        let error = |msg: String| {
            let msg = if msg.is_empty() {
                UNEXPECTED_MESSAGE.to_string()
            } else {
                msg
            };
            OutcomeBody::Error(ErrorReply { error: msg })
        };

        match self {
            Self::Success { result_image } => OutcomeBody::Reply(TryOnReply {
                result_image,
                message: SUCCESS_MESSAGE.to_string(),
            }),
            Self::SoftFallback { person_image } => OutcomeBody::Reply(TryOnReply {
                result_image: person_image,
                message: FALLBACK_MESSAGE.to_string(),
            }),
            Self::RateLimited => error(RATE_LIMITED_MESSAGE.to_string()),
            Self::UsageLimited => error(USAGE_LIMITED_MESSAGE.to_string()),
            Self::GatewayError { status } => error(format!("AI gateway error: {status}")),
            Self::Validation(msg) | Self::Config(msg) | Self::Fault(msg) => error(msg),
        }
    }
}
