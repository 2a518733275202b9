//! Error types for the BMI Insights application

use thiserror::Error;

/// Failure kinds of the BMI pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BmiError {
    /// Inputs failed validation or produced a non-finite/non-positive BMI
    #[error("Invalid measurement: {message}")]
    InvalidMeasurement {
        /// Offending form field, when one can be named
        field: Option<String>,
        message: String,
    },

    /// The advice collaborator failed or returned no usable advice text
    #[error("Advice unavailable: {0}")]
    AdviceUnavailable(String),
}

impl BmiError {
    /// Invalid measurement attributed to a specific field
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        BmiError::InvalidMeasurement {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Invalid measurement not attributable to a single field
    pub fn invalid(message: impl Into<String>) -> Self {
        BmiError::InvalidMeasurement {
            field: None,
            message: message.into(),
        }
    }
}
