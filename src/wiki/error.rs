// src/wiki/error.rs
// =============================================================================
// Errors that can happen while turning a wiki page into shell snippets.
//
// We use `thiserror` so every variant gets a Display message for free.
// The message is what ends up in "# Error fetching ..." lines and in the
// body of HTTP 500 responses, so keep it short and human-readable.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    /// The `type` field was neither "github" nor "gitlab"
    #[error("Unsupported type: {0}")]
    UnsupportedProvider(String),

    /// The upstream answered with a non-2xx status.
    /// For GitHub this is always the status of the PRIMARY request.
    #[error("Failed to fetch: {status}")]
    Status { status: StatusCode },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Owner/repo/page could not be turned into a URL
    #[error("Invalid wiki URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The wiki page configuration was not valid JSON
    #[error("Invalid wiki page configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WikiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = WikiError::UnsupportedProvider("bitbucket".to_string());
        assert_eq!(err.to_string(), "Unsupported type: bitbucket");
    }

    #[test]
    fn test_status_message_has_code_and_reason() {
        let err = WikiError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "Failed to fetch: 404 Not Found");
    }
}
