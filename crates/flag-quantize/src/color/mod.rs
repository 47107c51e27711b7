//! Color types and conversion utilities
//!
//! This module provides the two color representations the pipeline works in:
//!
//! - **Rgba**: Floating-point working sample. Filters operate on these and may
//!   push channels outside `0.0..=1.0` until the final clamp.
//! - **Rgb8**: 8-bit-per-channel color. Palette identity and nearest-color
//!   distances are computed in this space.
//!
//! # Example
//!
//! ```
//! use flag_quantize::{Rgb8, Rgba};
//!
//! // Load a pixel from an image (8-bit)
//! let sample = Rgba::from_u8(128, 64, 32, 255);
//!
//! // Filters may overshoot the valid range...
//! let bright = Rgba::new(sample.r + 0.8, sample.g, sample.b, sample.a);
//!
//! // ...conversion back to 8-bit clamps it
//! assert_eq!(bright.to_rgb8(), Rgb8::new(255, 64, 32));
//! ```

mod hsv;
mod rgba;

pub use hsv::{saturation, SATURATION_THRESHOLD};
pub use rgba::{Rgb8, Rgba};
