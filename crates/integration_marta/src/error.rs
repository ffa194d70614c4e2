//! MARTA feed error types

use thiserror::Error;

/// Errors that can occur while fetching a MARTA feed
///
/// Feed failures fall into three kinds:
/// - transport ([`is_transport`](Self::is_transport)): no response arrived
/// - malformed response ([`is_malformed_response`](Self::is_malformed_response)):
///   a 2xx body that is not an array of well-formed records
/// - upstream status: the feed answered with a non-2xx status
///   (`UnexpectedStatus`, `RateLimitExceeded`); neither classifier matches these,
///   use [`is_upstream_status`](Self::is_upstream_status)
///
/// `InvalidUrl` and `ConfigurationError` are raised before any request is sent.
#[derive(Debug, Error)]
pub enum MartaError {
    /// The request never produced a response (DNS, connect, TLS, timeout)
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] reqwest::Error),

    /// The feed answered with a non-success status
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the feed
        status: u16,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the feed)
        retry_after_secs: Option<u64>,
    },

    /// Response body is not a JSON array of records
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A numeric or timestamp field could not be coerced
    #[error("Invalid value {value:?} for field {field}: {reason}")]
    InvalidField {
        /// Upstream field name
        field: &'static str,
        /// Raw upstream value
        value: String,
        /// Why coercion failed
        reason: String,
    },

    /// The request URL could not be composed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl MartaError {
    /// Returns true if the failure happened in the transport layer
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }

    /// Returns true if the feed answered but the body could not be mapped
    #[must_use]
    pub const fn is_malformed_response(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::InvalidField { .. })
    }

    /// Returns true if the feed answered with a non-success status
    #[must_use]
    pub const fn is_upstream_status(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus { .. } | Self::RateLimitExceeded { .. }
        )
    }

    /// Returns true if the request hit the client timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectionFailed(e) if e.is_timeout())
    }

    /// Returns true if repeating the call may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::RateLimitExceeded { .. } => true,
            Self::UnexpectedStatus { status } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> MartaError {
        MartaError::from(serde_json::from_str::<Vec<u8>>("not json").unwrap_err())
    }

    fn invalid_field() -> MartaError {
        MartaError::InvalidField {
            field: "WAITING_SECONDS",
            value: "soon".to_string(),
            reason: "invalid digit found in string".to_string(),
        }
    }

    #[test]
    fn test_malformed_response_errors() {
        assert!(parse_error().is_malformed_response());
        assert!(invalid_field().is_malformed_response());
        assert!(!parse_error().is_transport());
        assert!(!MartaError::UnexpectedStatus { status: 500 }.is_malformed_response());
    }

    #[test]
    fn test_upstream_status_errors() {
        let status = MartaError::UnexpectedStatus { status: 401 };
        let limited = MartaError::RateLimitExceeded {
            retry_after_secs: None,
        };
        for err in [&status, &limited] {
            assert!(err.is_upstream_status());
            assert!(!err.is_transport());
            assert!(!err.is_malformed_response());
        }
        assert!(!parse_error().is_upstream_status());
        assert!(!invalid_field().is_upstream_status());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(MartaError::UnexpectedStatus { status: 503 }.is_retryable());
        assert!(
            MartaError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!parse_error().is_retryable());
        assert!(!invalid_field().is_retryable());
        assert!(!MartaError::UnexpectedStatus { status: 401 }.is_retryable());
        assert!(!MartaError::InvalidUrl("x".to_string()).is_retryable());
        assert!(!MartaError::ConfigurationError("x".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = invalid_field();
        assert!(err.to_string().contains("WAITING_SECONDS"));
        assert!(err.to_string().contains("\"soon\""));

        let err = MartaError::UnexpectedStatus { status: 404 };
        assert!(err.to_string().contains("404"));

        let err = MartaError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));
    }
}
