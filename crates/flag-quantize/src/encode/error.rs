//! Error type for parsing encoded flags.

use std::fmt;
use std::num::ParseFloatError;

/// Error returned when a string does not follow the encoded flag grammar.
///
/// Token indices are 0-based positions in the comma-separated list.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseFlagError {
    /// The flag contains no tokens at all
    Empty,
    /// A token has no `:` between its two components
    MissingSeparator {
        /// Index of the offending token
        index: usize,
    },
    /// A component is not a decimal number
    InvalidNumber {
        /// Index of the offending token
        index: usize,
        /// Underlying float parse failure
        source: ParseFloatError,
    },
    /// A component parsed but lies outside `0.0..=1.0`
    OutOfRange {
        /// Index of the offending token
        index: usize,
        /// The parsed value
        value: f32,
    },
}

impl fmt::Display for ParseFlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFlagError::Empty => write!(f, "encoded flag is empty"),
            ParseFlagError::MissingSeparator { index } => {
                write!(f, "token {} is missing the ':' separator", index)
            }
            ParseFlagError::InvalidNumber { index, source } => {
                write!(f, "token {} has an invalid number: {}", index, source)
            }
            ParseFlagError::OutOfRange { index, value } => {
                write!(f, "token {} has a coordinate out of range: {}", index, value)
            }
        }
    }
}

impl std::error::Error for ParseFlagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseFlagError::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}
