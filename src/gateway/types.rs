//! Wire types for the chat-completions gateway.

use serde::{Deserialize, Serialize};

/// Instruction sent alongside the person and garment images.
pub const TRY_ON_PROMPT: &str = "Create a realistic virtual try-on image. Take the person from the first image and show them wearing the clothing item from the second image. The result should look natural and realistic, as if the person is actually wearing the garment. Maintain the person's pose, body proportions, and setting from the original photo.";

/// A chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Target model identifier.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Requested output modalities.
    pub modalities: Vec<String>,
}

impl ChatRequest {
    /// Builds the try-on request: one user message holding the instruction,
    /// then the person image, then the garment image.
    pub fn try_on(model: impl Into<String>, person_image: &str, clothing_image: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: TRY_ON_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl::new(person_image),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl::new(clothing_image),
                    },
                ],
            }],
            modalities: vec!["image".to_string(), "text".to_string()],
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role (`user`).
    pub role: String,
    /// Multimodal content parts.
    pub content: Vec<ContentPart>,
}

/// A multimodal content part.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text instruction.
    Text {
        /// Instruction text.
        text: String,
    },
    /// Image reference (URL or data URI).
    ImageUrl {
        /// Image location.
        image_url: ImageUrl,
    },
}

/// `{ "url": ... }` wrapper for outgoing image parts.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// Image URL or data URI.
    pub url: String,
}

impl ImageUrl {
    /// Wraps a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

const FIRST_IMAGE: &str = "/choices/0/message/images/0/image_url/url";
const FIRST_TEXT: &str = "/choices/0/message/content";

/// A chat-completion response.
///
/// Kept as raw JSON: any body that parses is accepted, and a missing or
/// malformed level on the way to the image reads as "no image".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ChatResponse {
    body: serde_json::Value,
}

impl ChatResponse {
    /// Returns `choices[0].message.images[0].image_url.url` when it is a
    /// non-empty string.
    pub fn first_image(&self) -> Option<&str> {
        self.body
            .pointer(FIRST_IMAGE)?
            .as_str()
            .filter(|url| !url.is_empty())
    }

    /// Returns the first choice's text content, when it is a plain string.
    pub fn first_text(&self) -> Option<&str> {
        self.body.pointer(FIRST_TEXT)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_on_request_shape() {
        let req = ChatRequest::try_on("m", "data:person", "data:shirt");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["modalities"], serde_json::json!(["image", "text"]));
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);

        let content = &json["messages"][0]["content"];
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], TRY_ON_PROMPT);
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:person");
        assert_eq!(content[2]["image_url"]["url"], "data:shirt");
    }

    #[test]
    fn test_first_image_present() {
        let json = r#"{
            "choices": [{
                "message": {
                    "content": "Here you go",
                    "images": [{"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}]
                }
            }]
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.first_image(), Some("data:image/png;base64,AAAA"));
        assert_eq!(resp.first_text(), Some("Here you go"));
    }

    #[test]
    fn test_first_image_tolerates_missing_levels() {
        for json in [
            r#"{}"#,
            r#"{"choices": []}"#,
            r#"{"choices": null}"#,
            r#"{"choices": [{"message": null}]}"#,
            r#"{"choices": [{"message": {"images": null}}]}"#,
            r#"{"choices": [{}]}"#,
            r#"{"choices": [{"message": {"content": "no image"}}]}"#,
            r#"{"choices": [{"message": {"images": []}}]}"#,
            r#"{"choices": [{"message": {"images": [{}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": {"url": ""}}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": {}}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": {"url": null}}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": "data:image/png;base64,AAAA"}]}}]}"#,
            r#"{"choices": [{"message": {"images": [{"image_url": {"url": 7}}]}}]}"#,
            r#"{"choices": [{"message": {"images": ["data:image/png;base64,AAAA"]}}]}"#,
            r#"{"choices": {"message": {}}}"#,
            r#""ok""#,
            r#"null"#,
        ] {
            let resp: ChatResponse = serde_json::from_str(json).unwrap();
            assert_eq!(resp.first_image(), None, "payload: {json}");
        }
    }
}
