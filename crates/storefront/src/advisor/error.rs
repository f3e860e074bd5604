//! Error types for the advisor model client.
//!
//! These never reach visitors: the advisor collapses every variant into an
//! absent result and logs the cause.

use solar_direct_core::AdvisorResultError;
use thiserror::Error;

/// Errors that can occur while obtaining an advisor estimate.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the API (e.g. `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The API key cannot be sent as a header value.
    #[error("API key contains invalid header characters")]
    InvalidApiKey,

    /// The response had no candidate text.
    #[error("empty response from model")]
    EmptyResponse,

    /// Failed to parse the response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The estimate contained an out-of-range value.
    #[error("invalid estimate: {0}")]
    OutOfRange(#[from] AdvisorResultError),
}

/// API error response from Gemini.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// HTTP status code.
    #[serde(default)]
    pub code: u16,
    /// Error message.
    pub message: String,
    /// Canonical status name.
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_error_display() {
        let err = AdvisorError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");

        let err = AdvisorError::Api {
            status: "INVALID_ARGUMENT".to_string(),
            message: "Request contains an invalid argument.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (INVALID_ARGUMENT): Request contains an invalid argument."
        );

        let err = AdvisorError::from(AdvisorResultError::OutOfRange {
            field: "paybackPeriod",
        });
        assert_eq!(err.to_string(), "invalid estimate: paybackPeriod is out of range");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 400);
        assert_eq!(response.error.status, "INVALID_ARGUMENT");
        assert!(response.error.message.starts_with("API key not valid"));
    }
}
