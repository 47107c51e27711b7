//! Source image preprocessing.
//!
//! This module turns an arbitrary-sized source image into a fixed-resolution
//! buffer ready for palette matching. The complete pipeline:
//!
//! 1. **Resize** (bilinear) - scale to the target resolution
//! 2. **Brightness** - additive offset on RGB
//! 3. **Contrast** - midpoint-centered scaling
//! 4. **Sharpen** - 3x3 kernel blended by strength
//! 5. **Median** - per-channel N x N denoise
//!
//! # Processing Order
//!
//! Resize happens **first**, so every filter runs at the small target
//! resolution. The filters always run in the order above; a filter whose
//! parameter is at its neutral value is skipped. Filters do not clamp: the
//! single clamp happens when a sample is classified and matched.
//!
//! # Example
//!
//! ```
//! use flag_quantize::{PixelBuffer, Preprocessor, ProcessingParameters, Rgba};
//!
//! let params = ProcessingParameters::new()
//!     .contrast(1.8)
//!     .median_size(3);
//! let preprocessor = Preprocessor::new(100, 66, params);
//!
//! let input = PixelBuffer::filled(20, 20, Rgba::new(0.5, 0.5, 0.5, 1.0));
//! let result = preprocessor.process(&input);
//!
//! assert_eq!(result.width(), 100);
//! assert_eq!(result.height(), 66);
//! ```

mod filters;
mod options;
mod preprocessor;
mod resize;

pub use filters::{apply_brightness, apply_contrast, apply_median, apply_sharpen};
pub use options::ProcessingParameters;
pub use preprocessor::Preprocessor;
pub use resize::resize_bilinear;
