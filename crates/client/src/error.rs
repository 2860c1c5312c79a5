//! Client error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from talking to the record store or the local session file.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The configured base URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading or writing the session file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the server reported the record as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ClientError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "Bad request: id mismatch".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 400 Bad Request: Bad request: id mismatch"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        let err = ClientError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }
}
