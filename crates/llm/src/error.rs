use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GROQ_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no response from api")]
    EmptyResponse,
    #[error("response json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;
