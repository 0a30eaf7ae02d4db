//! Validation error types

use std::fmt;

/// A single violated rule on a client field.
///
/// `field` is the human-facing field label ("Name", "Email", "Phone").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field absent (or empty) where it is mandatory
    Required { field: &'static str },

    /// Field explicitly supplied as an empty string
    Empty { field: &'static str },

    /// Field exceeds the column width
    TooLong { field: &'static str, max: usize },

    /// Field doesn't match the required shape
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{} {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every rule a payload violated, in field order.
pub type ValidationErrors = Vec<ValidationError>;
