//! AI gateway client (OpenAI-style multimodal chat completions).

mod chat;
mod provider;
mod types;

pub use chat::{ChatGateway, ChatGatewayBuilder, API_KEY_ENV, DEFAULT_GATEWAY_URL, DEFAULT_MODEL};
pub use provider::Gateway;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, TRY_ON_PROMPT};

#[cfg(test)]
mod fake;
#[cfg(test)]
pub(crate) use fake::ScriptedGateway;
