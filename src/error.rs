//! Error types for robots.txt API misuse.
//!
//! Malformed robots.txt *content* never produces an error; it is either
//! dropped or recorded as a [`Report`](crate::Report). The errors here only
//! cover calls made with a missing or unusable argument.

use std::fmt;

/// Errors raised when a call argument is missing or has an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// A required argument was empty
    Missing {
        /// Name of the missing argument
        argument: &'static str,
    },
    /// An argument had a value outside its accepted set
    Invalid {
        /// Name of the argument
        argument: &'static str,
        /// The rejected value
        value: String,
    },
}

impl ArgumentError {
    /// Returns `Ok(value)` if `value` is non-empty, otherwise a `Missing` error
    /// naming `argument`.
    pub(crate) fn require<'a>(argument: &'static str, value: &'a str) -> Result<&'a str, Self> {
        if value.is_empty() {
            Err(Self::Missing { argument })
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { argument } => {
                write!(f, "missing required argument '{argument}'")
            }
            Self::Invalid { argument, value } => {
                write!(f, "invalid value '{value}' for argument '{argument}'")
            }
        }
    }
}

impl std::error::Error for ArgumentError {}
