//! Error types for pagoda-transformer
//!
//! This module defines the error types used throughout the application.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use thiserror::Error;

/// A single metric violates the contract of the (already validated) input
/// schema. The decoder should have rejected such documents; hitting one of
/// these mid-transform is fatal for that metric's conversion.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Metric name is missing or empty
    #[error("metric name is empty")]
    EmptyName,

    /// The metric-points choice is neither the single nor the list case
    #[error("metric-points has no recognizable variant")]
    UnrecognizedPointsVariant,

    /// Timestamp cannot be represented as UTC calendar time
    #[error("timestamp {timestamp} is outside the representable range")]
    TimestampOutOfRange { timestamp: Decimal },
}

/// Transform engine error
#[derive(Error, Debug)]
pub enum TransformError {
    /// Schema contract violation, tagged with the offending input metric key
    #[error("schema contract violation in metric '{key}': {source}")]
    Contract {
        key: String,
        #[source]
        source: SchemaError,
    },
}

/// Binding codec error
#[derive(Error, Debug)]
pub enum CodecError {
    /// The raw bytes do not decode into the expected document shape
    #[error("failed to decode {schema} document: {source}")]
    Decode {
        schema: String,
        #[source]
        source: serde_json::Error,
    },

    /// The output document could not be serialized
    #[error("failed to encode {schema} document: {source}")]
    Encode {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Codec error
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Metric transformation error
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, public_message, log_message) = match self {
            AppError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error",
                e.to_string(),
            ),
            AppError::Codec(e @ CodecError::Decode { .. }) => {
                (StatusCode::BAD_REQUEST, "Undecodable document", e.to_string())
            }
            AppError::Codec(e @ CodecError::Encode { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Encoding failure",
                e.to_string(),
            ),
            AppError::Transform(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Schema contract violation",
                e.to_string(),
            ),
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error", e),
        };

        tracing::error!(status = %status, error = %log_message, "Request failed");

        (status, public_message).into_response()
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
