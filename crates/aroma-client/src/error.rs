//! # API Error Types
//!
//! Error types for cloud API operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     HTTP Status         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  Unauthorized           │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  NotFound               │ │
//! │  │  MissingDeviceId│  │                 │  │  Rejected / ServerError │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Transport errors and 5xx answers are retryable; a Rejected answer is  │
//! │  the API refusing the sale itself and must reach the cashier verbatim. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error type covering configuration, transport and HTTP failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Missing device ID (required for sale submission).
    #[error("Device ID not configured. Run initial setup first.")]
    MissingDeviceId,

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Failed to reach the API at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request ran past the configured timeout.
    #[error("Request timed out")]
    Timeout,

    // =========================================================================
    // HTTP Status Errors
    // =========================================================================
    /// 401/403: the token was missing, expired or insufficient.
    #[error("Not authorized by the API. Check the configured token.")]
    Unauthorized,

    /// 404: the requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400/409/422: the API understood and refused the request.
    /// The message comes from the API and is meant for the cashier.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The body of a success answer did not parse.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Client-side failure outside the categories above.
    #[error("Internal client error: {0}")]
    Internal(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for retry decisions)
// =============================================================================

impl ApiError {
    /// Returns true if resubmitting the same request may succeed.
    ///
    /// ## Retryable Errors
    /// - Connection failures (network issues)
    /// - Timeouts
    /// - 5xx answers
    ///
    /// ## Non-Retryable Errors
    /// - Configuration errors
    /// - Authorization failures
    /// - Business rejections (resubmitting reproduces the refusal)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::ConnectionFailed(_) | ApiError::Timeout | ApiError::ServerError { .. }
        )
    }

    /// Returns true if the API itself refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidConfig(_)
                | ApiError::InvalidUrl(_)
                | ApiError::MissingDeviceId
                | ApiError::ConfigLoadFailed(_)
                | ApiError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ApiError::ConnectionFailed("refused".into()).is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::ServerError {
            status: 503,
            message: "maintenance".into()
        }
        .is_retryable());

        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Rejected {
            message: "insufficient stock".into()
        }
        .is_retryable());
        assert!(!ApiError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_rejection_detection() {
        assert!(ApiError::Rejected {
            message: "duplicate".into()
        }
        .is_rejection());
        assert!(!ApiError::Timeout.is_rejection());
        assert!(!ApiError::NotFound("product".into()).is_rejection());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Rejected {
            message: "Insufficient stock for LAV-330".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request rejected: Insufficient stock for LAV-330"
        );

        let err = ApiError::ServerError {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert!(err.to_string().contains("502"));
    }
}
