//! Validation error types

use std::fmt;

/// Validation error for submitted feedback.
///
/// `Display` output is the exact message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is absent, not JSON, not an object, or an empty object
    BodyRequired,

    /// Field is absent, null, empty, or not a string
    MissingField { field: &'static str },

    /// Field is empty after trimming
    Empty { field: &'static str },

    /// Field is shorter than the minimum after trimming
    TooShort { field: &'static str, min: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BodyRequired => write!(f, "Request body is required"),
            Self::MissingField { field } => {
                write!(f, "Missing or invalid required field: {}", field)
            }
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters long", field, min)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
