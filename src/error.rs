//! Error types for the LC filter designer.
//!
//! This module provides a unified error type [`FilterError`] that covers
//! input validation, physically infeasible designs, unit-string parsing and
//! the I/O of the presentation layers.

use thiserror::Error;

/// Result type alias using [`FilterError`].
pub type Result<T> = std::result::Result<T, FilterError>;

/// Unified error type for all filter design operations.
#[derive(Error, Debug)]
pub enum FilterError {
    // ============ Design Errors ============
    /// Malformed or out-of-range input (frequency, order, family name, ...)
    #[error("{message}")]
    Validation { message: String },

    /// Inputs are valid but the requested network cannot be built
    #[error("{message}")]
    DesignRange { message: String },

    /// A value string such as "14.2MHz" could not be parsed
    #[error("Invalid {quantity}: '{input}'")]
    InvalidQuantity { quantity: String, input: String },

    // ============ Output Errors ============
    /// Error writing rendered output
    #[error("Output error: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failure
    #[error("JSON serialization failed: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization failure
    #[error("CSV serialization failed: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },
}

impl FilterError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a design-range error
    pub fn design_range(message: impl Into<String>) -> Self {
        Self::DesignRange {
            message: message.into(),
        }
    }

    /// Create an unparseable-quantity error
    pub fn invalid_quantity(quantity: impl Into<String>, input: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            quantity: quantity.into(),
            input: input.into(),
        }
    }

    /// True for errors caused by the caller's parameters rather than output plumbing.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::DesignRange { .. } | Self::InvalidQuantity { .. }
        )
    }
}

impl From<std::io::Error> for FilterError {
    fn from(source: std::io::Error) -> Self {
        Self::Output { source }
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

impl From<csv::Error> for FilterError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}
