//! Error types for employee id parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating employee ids.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The id string is empty.
    #[error("employee id cannot be empty")]
    Empty,

    /// The id contains something other than ASCII digits.
    #[error("employee id is not numeric: '{0}'")]
    NotNumeric(String),

    /// Zero is never a valid employee id.
    #[error("employee id must be greater than zero")]
    Zero,

    /// The id does not belong to the expected office.
    #[error("employee id {id} is outside the {office} range [{min}:{max}]")]
    OutOfRange {
        id: u32,
        office: &'static str,
        min: u32,
        max: u32,
    },
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }

    /// Returns true if this error indicates an office range violation.
    pub fn is_range_error(&self) -> bool {
        matches!(self, IdError::OutOfRange { .. })
    }
}
