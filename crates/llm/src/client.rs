use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{LlmError, Result};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ImageAttachment};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const TEXT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
const VISION_MODEL_VAR: &str = "GROQ_VISION_MODEL";
const TEXT_TEMPERATURE: f32 = 0.7;
const VISION_TEMPERATURE: f32 = 0.5;
const VISION_MAX_TOKENS: u32 = 512;

/// One request/response exchange with a chat-completion endpoint. No retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    async fn chat_with_vision(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        images: &[ImageAttachment],
    ) -> Result<String>;
}

pub fn vision_model_from_env() -> String {
    match std::env::var(VISION_MODEL_VAR) {
        Ok(model) if !model.trim().is_empty() => model,
        _ => DEFAULT_VISION_MODEL.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub vision_model: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Builds a config from the `GROQ_API_KEY` value; a blank key counts as missing.
    /// The vision model override is read from the environment.
    pub fn from_api_key(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        config.vision_model = vision_model_from_env();
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub struct GroqClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        if let Some(usage) = parsed.usage {
            debug!(
                model = %request.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "provider reported usage"
            );
        }
        parsed.first_content().ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.text_model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            temperature: TEXT_TEMPERATURE,
            max_tokens: None,
        };
        self.send_request(&request).await
    }

    async fn chat_with_vision(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        images: &[ImageAttachment],
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.config.vision_model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user_with_images(user_prompt, images),
            ],
            temperature: VISION_TEMPERATURE,
            max_tokens: Some(VISION_MAX_TOKENS),
        };
        self.send_request(&request).await
    }
}
