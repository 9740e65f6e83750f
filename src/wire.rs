//! JSON contract between the try-on client and the proxy endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /virtual-tryon`.
///
/// Both fields are optional on the wire so that a missing image is reported
/// as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    /// Photo of the person, as a data URI or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_image: Option<String>,
    /// Image of the garment, as a data URI or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_image: Option<String>,
}

impl TryOnRequest {
    /// Creates a request carrying both images.
    pub fn new(person_image: impl Into<String>, clothing_image: impl Into<String>) -> Self {
        Self {
            person_image: Some(person_image.into()),
            clothing_image: Some(clothing_image.into()),
        }
    }

    /// Returns both images when each is present and non-empty.
    pub fn images(&self) -> Option<(&str, &str)> {
        let person = self.person_image.as_deref().filter(|s| !s.is_empty())?;
        let clothing = self.clothing_image.as_deref().filter(|s| !s.is_empty())?;
        Some((person, clothing))
    }
}

/// 200 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnReply {
    /// Generated image, or the person image on fallback.
    pub result_image: String,
    /// Human-readable status line.
    pub message: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    /// What went wrong.
    pub error: String,
}

/// Any body the proxy may send, decoded leniently by the client.
/// Fields the client does not act on are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyReply {
    /// Present on success.
    #[serde(default)]
    pub result_image: Option<String>,
    /// Present on failure, and occasionally inside a 2xx body.
    #[serde(default)]
    pub error: Option<String>,
}
