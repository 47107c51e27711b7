//! Unified error type for the flag-quantize public API.
//!
//! The pipeline itself is total over valid buffers; errors only come from
//! building buffers out of raw data and from reading encoded flags back.

use std::fmt;

use crate::buffer::BufferError;
use crate::encode::ParseFlagError;

/// Unified error type for the flag-quantize public API.
///
/// # Example
///
/// ```
/// use flag_quantize::{EncodedFlag, PixelBuffer, QuantizeError};
///
/// fn read_back(bytes: &[u8], text: &str) -> Result<usize, QuantizeError> {
///     let palette = PixelBuffer::from_rgba8(1, 1, bytes)?;
///     let flag: EncodedFlag = text.parse()?;
///     Ok(palette.width() * flag.token_count())
/// }
///
/// assert_eq!(read_back(&[0, 0, 0, 255], "0:0").unwrap(), 1);
/// assert!(read_back(&[0, 0, 0], "0:0").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizeError {
    /// Invalid image geometry or raw data length
    Buffer(BufferError),
    /// Malformed encoded flag
    ParseFlag(ParseFlagError),
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::Buffer(err) => write!(f, "buffer error: {}", err),
            QuantizeError::ParseFlag(err) => write!(f, "flag parse error: {}", err),
        }
    }
}

impl std::error::Error for QuantizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantizeError::Buffer(err) => Some(err),
            QuantizeError::ParseFlag(err) => Some(err),
        }
    }
}

impl From<BufferError> for QuantizeError {
    fn from(err: BufferError) -> Self {
        QuantizeError::Buffer(err)
    }
}

impl From<ParseFlagError> for QuantizeError {
    fn from(err: ParseFlagError) -> Self {
        QuantizeError::ParseFlag(err)
    }
}
