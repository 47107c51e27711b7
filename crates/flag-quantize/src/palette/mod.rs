//! Palette indexing and nearest-color matching.
//!
//! A palette image is indexed once into [`ReferenceMaps`]: two
//! insertion-ordered lists of distinct colors with the UV coordinate where
//! each color first appears. Processed pixels are then matched against the
//! list that shares their chroma class.
//!
//! # Example
//!
//! ```
//! use flag_quantize::{PixelBuffer, ReferenceMaps, Rgba, Uv};
//!
//! let palette = PixelBuffer::new(
//!     2,
//!     1,
//!     vec![Rgba::from_u8(255, 0, 0, 255), Rgba::from_u8(0, 0, 255, 255)],
//! )
//! .unwrap();
//! let maps = ReferenceMaps::build(&palette);
//!
//! assert_eq!(maps.match_pixel(Rgba::new(0.1, 0.0, 0.8, 1.0)), Uv::new(1.0, 0.0));
//! ```

mod matcher;
mod reference;

pub use matcher::{find_closest_uv, is_achromatic};
pub use reference::{ColorUvEntry, ReferenceMap, ReferenceMaps, Uv};
