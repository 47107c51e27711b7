//! Output types derived from an encoded flag.
//!
//! - [`FlagPreview`]: RGB reconstruction by sampling the palette atlas at
//!   each UV

mod preview;

pub use preview::FlagPreview;
