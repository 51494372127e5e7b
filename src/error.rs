use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),
    #[error("Authentication failed")]
    Authentication(#[source] BoxError),
    #[error("Twitter client not initialized")]
    NotInitialized,
    #[error("Invalid tweet content: {0}")]
    InvalidContent(String),
    #[error("Failed to post tweet")]
    PostingFailed(#[source] BoxError),
    #[error("LLM '{0}' is not supported")]
    UnsupportedBackend(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to generate content")]
    Generation(#[source] BoxError),
    #[error("Backend '{0}' is not implemented yet")]
    NotImplemented(String),
}

impl BotError {
    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BotError::MissingCredentials(_)
            | BotError::Config(_)
            | BotError::UnsupportedBackend(_) => 2,
            BotError::Authentication(_) => 3,
            BotError::InvalidContent(_) | BotError::NotInitialized => 4,
            BotError::PostingFailed(_) | BotError::Generation(_) | BotError::NotImplemented(_) => 1,
        }
    }
}
