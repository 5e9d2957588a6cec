use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("ingest error: {0}")]
    Ingest(#[from] ingest::IngestError),
    #[error("remote analysis failed: {0}")]
    Llm(#[from] llm_client::LlmError),
    #[error("failed to parse analysis response: {source}. Response was: {raw}")]
    MalformedResponse {
        source: serde_json::Error,
        raw: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
