/// Error types for the inference client
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("API request failed: {0}")]
    Api(#[from] async_openai::error::OpenAIError),

    #[error("Endpoint returned an empty completion")]
    EmptyCompletion,
}

pub type Result<T> = std::result::Result<T, ChatError>;
