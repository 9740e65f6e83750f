//! User-facing notifications.

use serde::Serialize;

/// Shown when a failure carries no message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Neutral styling.
    Default,
    /// Error styling.
    Destructive,
}

/// A dismissable toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Bold first line.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Styling.
    pub variant: Variant,
}

impl Notification {
    /// Toast shown after a try-on completes.
    pub fn success() -> Self {
        Self {
            title: "Virtual Try-On Complete!".to_string(),
            description: "Your AI-generated look is ready.".to_string(),
            variant: Variant::Default,
        }
    }

    /// Failure toast; an empty message is replaced by a generic one.
    pub fn failure(message: &str) -> Self {
        let description = if message.trim().is_empty() {
            GENERIC_FAILURE
        } else {
            message
        };
        Self {
            title: "Generation Failed".to_string(),
            description: description.to_string(),
            variant: Variant::Destructive,
        }
    }

    /// True for the destructive variant.
    pub fn is_failure(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
