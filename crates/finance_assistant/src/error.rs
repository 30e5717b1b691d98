/// Error types for completion requests
use thiserror::Error;

pub use async_openai::error::{ApiError, OpenAIError};

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Completion API error: {0}")]
    Api(#[from] OpenAIError),

    #[error("Empty response from model: {0}")]
    EmptyResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
