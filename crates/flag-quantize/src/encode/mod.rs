//! Serialization of matched UV coordinates.
//!
//! [`EncodedFlag`] is both the output of a quantization run and the on-disk
//! format of a saved flag, so anything that reads a saved file gets exactly
//! what a fresh run would have produced.

mod error;
mod flag;

pub use error::ParseFlagError;
pub use flag::{EncodedFlag, TOKEN_SEPARATOR, UV_PRECISION, UV_SEPARATOR};
