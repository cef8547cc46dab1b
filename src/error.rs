//! Error types for the reel resolver service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing failed: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// HTTP status carried by this error at the service boundary.
    ///
    /// Upstream and transport failures map to 404: by the time one reaches
    /// the caller every strategy has been exhausted, and the contract
    /// reports that as "no media found". Only internal faults surface as 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ExtractError::InvalidInput(_) => 400,
            ExtractError::NotFound(_) => 404,
            ExtractError::Upstream(_)
            | ExtractError::HttpError(_)
            | ExtractError::UrlError(_)
            | ExtractError::JsonError(_) => 404,
            ExtractError::IoError(_) | ExtractError::Internal(_) => 500,
        }
    }

    /// Message safe to show to API callers. Internal details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            ExtractError::InvalidInput(msg) => msg.clone(),
            ExtractError::NotFound(msg) => msg.clone(),
            ExtractError::Upstream(_)
            | ExtractError::HttpError(_)
            | ExtractError::UrlError(_)
            | ExtractError::JsonError(_) => "No media found for this URL".to_string(),
            ExtractError::IoError(_) | ExtractError::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
