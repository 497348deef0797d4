use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching an issue
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Issue does not exist or is not visible with the given token (HTTP 404)
    #[error("Issue #{number} not found in {owner}/{repo}")]
    NotFound {
        owner: String,
        repo: String,
        number: u64,
    },

    /// Missing, invalid or insufficient token (HTTP 401, 403)
    #[error("Authentication failed: HTTP {0}")]
    Unauthorized(StatusCode),

    #[error("API request error: HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body is not JSON or lacks expected fields
    #[error("Invalid issue response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while creating a comment
#[derive(Error, Debug)]
pub enum PostError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API request error: HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },
}
