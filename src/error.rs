//! Error types for the dashboard worker
//!
//! Uses thiserror for ergonomic error definitions.
//! All errors are non-panicking for production safety.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard worker errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis backend API errors
    #[error("Backend API error: {0}")]
    Backend(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Market-data payload has no discoverable candle array
    #[error("market data payload has no candle array")]
    InvalidShape,

    /// Market-data payload is well-formed but contains no candles
    #[error("market data payload contains no candles")]
    NoData,

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(
            DashboardError::NoData
                .to_string()
                .contains("no candles")
        );
        assert!(
            DashboardError::InvalidShape
                .to_string()
                .contains("no candle array")
        );
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
    }
}
