//! Error types for the TestAPI client and result classification.

use std::time::Duration;

/// TestAPI client errors.
#[derive(Debug, thiserror::Error)]
pub enum TestApiError {
    /// Resource not found on the server.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Rate limit exceeded.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Invalid response from the server.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl TestApiError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::Config { .. } => 1,

            // Network/transient
            Self::RateLimited { .. } => 5,
            Self::Network { .. } => 5,

            Self::InvalidResponse { .. } => 6,
        }
    }

    /// Whether the error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Network { .. })
    }
}

impl From<reqwest::Error> for TestApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for TestAPI operations.
pub type TestApiResult<T> = Result<T, TestApiError>;

/// Errors raised while deriving classification data from a raw result.
///
/// The aggregator never propagates these; they are logged and the record
/// falls back to a default bucket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// The final dash segment of the build tag has no `.category` part.
    #[error("malformed build tag: {build_tag:?}")]
    MalformedBuildTag { build_tag: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(TestApiError::RateLimited { retry_after: None }.is_retryable());
        assert!(TestApiError::Network {
            message: "reset".into()
        }
        .is_retryable());
        assert!(!TestApiError::NotFound {
            resource: "x".into()
        }
        .is_retryable());
        assert!(!TestApiError::InvalidResponse {
            message: "bad".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            TestApiError::Config {
                message: "no url".into()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            TestApiError::Network {
                message: "down".into()
            }
            .exit_code(),
            5
        );
    }
}
