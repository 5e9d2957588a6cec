mod client;
mod error;
mod types;

pub use client::{
    API_KEY_VAR, ClientConfig, CompletionClient, DEFAULT_BASE_URL, DEFAULT_VISION_MODEL, GroqClient,
    TEXT_MODEL, vision_model_from_env,
};
pub use error::{LlmError, Result};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, Choice, ContentPart, ImageAttachment, ImageUrl,
    MessageContent, ResponseMessage, Role, Usage,
};
