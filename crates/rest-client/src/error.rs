//! REST client error types.

use thiserror::Error;

/// Errors that can occur during REST API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// Non-success HTTP status with the raw response body.
    #[error("HTTP error: {status} - {message}")]
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to parse response body as JSON.
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Rate limited by the server.
    #[error("Rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested wait time before retrying.
        retry_after_ms: u64,
    },

    /// The request could not be built (bad method, bad client config).
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// Check if this error is retryable.
    ///
    /// A rejected signature (401) is not: resending the same request would
    /// carry the same stale timestamp.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RestError::Timeout | RestError::Connection(_) | RestError::RateLimited { .. }
        ) || matches!(self, RestError::HttpError { status, .. } if *status >= 500)
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::HttpError { status, .. } => Some(*status),
            RestError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Response body of an HTTP error.
    pub fn body(&self) -> Option<&str> {
        match self {
            RestError::HttpError { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_decode() {
            RestError::Parse(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if let Some(status) = err.status() {
            RestError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            RestError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(RestError::Timeout.is_retryable());
        assert!(RestError::Connection("reset".into()).is_retryable());
        assert!(RestError::RateLimited { retry_after_ms: 10 }.is_retryable());
        assert!(RestError::HttpError {
            status: 503,
            message: String::new()
        }
        .is_retryable());

        assert!(!RestError::HttpError {
            status: 401,
            message: String::new()
        }
        .is_retryable());
        assert!(!RestError::Parse("eof".into()).is_retryable());
    }

    #[test]
    fn test_status_and_body() {
        let err = RestError::HttpError {
            status: 401,
            message: r#"{"success":false}"#.into(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some(r#"{"success":false}"#));

        assert_eq!(RestError::RateLimited { retry_after_ms: 1 }.status(), Some(429));
        assert_eq!(RestError::Timeout.status(), None);
        assert!(RestError::Timeout.body().is_none());
    }
}
