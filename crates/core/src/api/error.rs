//! Error types for backend communication.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },

    #[error("Unreadable response from {url}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    #[error("{0}")]
    Auth(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
