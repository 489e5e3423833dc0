//! Error types for the Dear Days conversion service.

use thiserror::Error;

/// Main error type for Dear Days operations.
#[derive(Error, Debug)]
pub enum DearDaysError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Date service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Caller-input validation errors. These are raised before any request is
/// sent to the external date service.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("A {calendar} date is required for this calendar type")]
    MissingDate { calendar: &'static str },

    #[error("Malformed date, expected YYYY-MM-DD: {0}")]
    MalformedDate(String),

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("No conversion candidates returned for the given lunar date")]
    NoCandidates,
}

/// External lunar-calendar data service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Service returned HTTP status {0}")]
    Status(u16),

    #[error("Malformed XML response: {0}")]
    Xml(String),

    /// Non-"00" result code. The message is the service's own `resultMsg`
    /// text so operators can diagnose quota and parameter errors.
    #[error("Service error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Response item missing required field: {0}")]
    MissingField(String),
}

/// Result type alias for Dear Days operations.
pub type Result<T> = std::result::Result<T, DearDaysError>;
