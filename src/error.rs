use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AdvisorError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AdvisorError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
