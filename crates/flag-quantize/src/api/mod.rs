//! Public API for the flag-quantize crate.
//!
//! This module provides the high-level API: the [`FlagQuantizer`] builder,
//! the one-shot [`process`] function and the [`QuantizeError`] unified
//! error type.

mod builder;
mod error;

pub use builder::{process, FlagQuantizer};
pub use error::QuantizeError;
