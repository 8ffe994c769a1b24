//! # Source Errors
//!
//! Error types for backend source calls.
//!
//! Adapters map backend-specific failures onto [`SourceError`] variants. The
//! orchestrator records only the rendered message as the opaque failure
//! reason on the composite view.
//!
//! # Examples
//!
//! ```
//! use product_aggregator::infrastructure::sources::error::SourceError;
//!
//! let error = SourceError::connection("connection refused");
//! assert!(error.is_retryable());
//!
//! let error = SourceError::invalid_response("unexpected payload shape");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for backend source calls.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The backend did not answer within the adapter's own deadline.
    #[error("Timeout")]
    Timeout,

    /// Network or connection failure.
    #[error("{message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The backend answered with an application-level error.
    #[error("{message}")]
    Upstream {
        /// Error message reported by the backend, carried verbatim.
        message: String,
    },

    /// The backend answered with a payload this crate cannot interpret.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// The backend is known to be unavailable.
    #[error("unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout() -> Self {
        Self::Timeout
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an upstream error carrying the backend's own message.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    ///
    /// The aggregation core itself never retries; this is advisory for
    /// callers that wrap it.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Connection { .. } | Self::Unavailable { .. }
        )
    }
}

/// Result type for backend source calls.
pub type SourceCallResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_renders_canonical_status() {
        assert_eq!(SourceError::timeout().to_string(), "Timeout");
    }

    #[test]
    fn upstream_message_carried_verbatim() {
        let error = SourceError::upstream("DB down");
        assert_eq!(error.to_string(), "DB down");
    }

    #[test]
    fn retryable_classification() {
        assert!(SourceError::timeout().is_retryable());
        assert!(SourceError::connection("refused").is_retryable());
        assert!(SourceError::unavailable("maintenance").is_retryable());
        assert!(!SourceError::upstream("bad request").is_retryable());
        assert!(!SourceError::invalid_response("garbage").is_retryable());
    }
}
