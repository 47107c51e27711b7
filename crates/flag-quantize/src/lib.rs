//! flag-quantize: turn an image into a palette-addressed flag
//!
//! This library converts an arbitrary source image into a compact stream of
//! palette coordinates. A *palette image* serves as a lookup atlas: each of
//! its distinct colors is addressed by the normalized UV position where it
//! first appears. Every pixel of the processed source is replaced by the UV
//! of its nearest palette color, and the UVs are serialized into an
//! [`EncodedFlag`].
//!
//! # Quick Start
//!
//! The [`FlagQuantizer`] builder is the primary entry point:
//!
//! ```
//! use flag_quantize::{FlagQuantizer, PixelBuffer, Rgba};
//!
//! let palette = PixelBuffer::new(
//!     3,
//!     1,
//!     vec![
//!         Rgba::from_u8(0, 0, 0, 255),
//!         Rgba::from_u8(255, 255, 255, 255),
//!         Rgba::from_u8(220, 20, 20, 255),
//!     ],
//! )
//! .unwrap();
//!
//! let quantizer = FlagQuantizer::from_palette(&palette).contrast(1.8).median_size(3);
//!
//! let source = PixelBuffer::filled(320, 200, Rgba::from_u8(180, 40, 40, 255));
//! let flag = quantizer.encode(&source);
//!
//! assert_eq!(flag.token_count(), 100 * 66);
//! assert!(flag.as_str().starts_with("1.000000:0.000000"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source PixelBuffer
//!     |
//!     v
//! [Resize]              bilinear, to 100x66 by default
//!     |
//!     v
//! [Filters]             brightness -> contrast -> sharpen -> median
//!     |
//!     v
//! [Clamp + classify]    HSV saturation < 0.1 ? achromatic : chromatic
//!     |
//!     v
//! [Nearest color]       squared 8-bit RGB distance, first entry wins ties
//!     |
//!     v
//! [Encode]              "u:v" with 6 decimals, comma-joined, x outer / y inner
//! ```
//!
//! The palette side runs once per palette: [`ReferenceMaps::build`] scans the
//! palette image row by row, deduplicates colors keeping the first position,
//! and splits them by saturation.
//!
//! # Determinism
//!
//! Identical inputs and parameters always produce byte-identical output.
//! Palette entries keep scan order, the filters have no randomness, and
//! ties in the nearest-color search go to the earliest entry.
//!
//! # Coordinates
//!
//! Pixel `(x, y)` of a [`PixelBuffer`] has UV `(x / (w - 1), y / (h - 1))`.
//! Which image edge row 0 corresponds to is up to the caller; the crate
//! never flips buffers on its own.
//!
//! # Errors
//!
//! The pipeline is total: resize, filters, indexing, matching and encoding
//! never fail on a valid [`PixelBuffer`]. Errors only arise when building
//! buffers from raw data ([`BufferError`]) and when reading flags back
//! ([`ParseFlagError`]). Both convert into [`QuantizeError`].

pub mod api;
pub mod buffer;
pub mod color;
pub mod encode;
pub mod output;
pub mod palette;
pub mod preprocess;


/// Default width of a processed flag in pixels.
pub const TARGET_WIDTH: usize = 100;

/// Default height of a processed flag in pixels.
pub const TARGET_HEIGHT: usize = 66;

pub use api::{process, FlagQuantizer, QuantizeError};
pub use buffer::{BufferError, PixelBuffer};
pub use color::{saturation, Rgb8, Rgba, SATURATION_THRESHOLD};
pub use encode::{EncodedFlag, ParseFlagError, TOKEN_SEPARATOR, UV_PRECISION, UV_SEPARATOR};
pub use output::FlagPreview;
pub use palette::{find_closest_uv, is_achromatic, ColorUvEntry, ReferenceMap, ReferenceMaps, Uv};
pub use preprocess::{
    apply_brightness, apply_contrast, apply_median, apply_sharpen, resize_bilinear, Preprocessor,
    ProcessingParameters,
};
