//! Resize followed by the fixed-order filter chain.
//!
//! # Processing Pipeline
//!
//! 1. **Resize** to the target resolution (bilinear)
//! 2. **Brightness** (skipped at 0.0)
//! 3. **Contrast** (skipped at 1.0)
//! 4. **Sharpen** (skipped at 0.0 and below)
//! 5. **Median** (skipped for window sizes of 1 and below)
//!
//! The order is fixed regardless of which filters are enabled.

use crate::buffer::PixelBuffer;

use super::filters::{apply_brightness, apply_contrast, apply_median, apply_sharpen};
use super::options::ProcessingParameters;
use super::resize::resize_bilinear;

/// Source image preprocessor.
///
/// Holds the target resolution and filter parameters; [`process`](Self::process)
/// takes `&self`, so one preprocessor can serve many images, including from
/// several threads at once.
///
/// # Example
///
/// ```
/// use flag_quantize::{PixelBuffer, Preprocessor, ProcessingParameters, Rgba};
///
/// let params = ProcessingParameters::new().contrast(1.5);
/// let preprocessor = Preprocessor::new(100, 66, params);
///
/// let source = PixelBuffer::filled(640, 480, Rgba::new(0.4, 0.4, 0.4, 1.0));
/// let result = preprocessor.process(&source);
///
/// assert_eq!(result.width(), 100);
/// assert_eq!(result.height(), 66);
/// ```
#[derive(Debug, Clone)]
pub struct Preprocessor {
    target_width: usize,
    target_height: usize,
    params: ProcessingParameters,
}

impl Preprocessor {
    /// Create a preprocessor for the given target resolution.
    ///
    /// # Panics
    ///
    /// Panics if either target dimension is zero.
    pub fn new(target_width: usize, target_height: usize, params: ProcessingParameters) -> Self {
        assert!(
            target_width > 0 && target_height > 0,
            "resize target must be positive, got {}x{}",
            target_width,
            target_height
        );
        Self {
            target_width,
            target_height,
            params,
        }
    }

    /// Target dimensions `(width, height)`.
    #[inline]
    pub fn target(&self) -> (usize, usize) {
        (self.target_width, self.target_height)
    }

    #[inline]
    pub fn params(&self) -> &ProcessingParameters {
        &self.params
    }

    /// Resize `source` and run every enabled filter in order.
    pub fn process(&self, source: &PixelBuffer) -> PixelBuffer {
        let mut working = resize_bilinear(source, self.target_width, self.target_height);
        self.apply_filters(&mut working);
        working
    }

    /// Run every enabled filter in order on an already-sized buffer.
    pub fn apply_filters(&self, buffer: &mut PixelBuffer) {
        let p = &self.params;
        if p.brightness_enabled() {
            apply_brightness(buffer, p.brightness);
        }
        if p.contrast_enabled() {
            apply_contrast(buffer, p.contrast);
        }
        if p.sharpen_enabled() {
            apply_sharpen(buffer, p.sharpen);
        }
        if p.median_enabled() {
            apply_median(buffer, p.median_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn pattern(width: usize, height: usize) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| {
                let v = ((i * 53) % 97) as f32 / 96.0;
                Rgba::new(v, (v * 0.5) + 0.25, 1.0 - v, 1.0)
            })
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_neutral_parameters_only_resize() {
        let src = pattern(100, 66);
        let result = Preprocessor::new(100, 66, ProcessingParameters::new()).process(&src);
        assert_eq!(result, src);
    }

    #[test]
    fn test_brightness_then_contrast_order() {
        // contrast(brightness(v)) = 0.5 + 2 * ((0.2 + 0.1) - 0.5) = 0.1
        // brightness(contrast(v)) would be 0.5 + 2 * (0.2 - 0.5) + 0.1 = 0.0
        let src = PixelBuffer::filled(2, 2, Rgba::new(0.2, 0.2, 0.2, 1.0));
        let params = ProcessingParameters::new().brightness(0.1).contrast(2.0);
        let result = Preprocessor::new(2, 2, params).process(&src);
        assert!((result.get(0, 0).r - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_sharpen_before_median() {
        let src = pattern(12, 9);
        let params = ProcessingParameters::new().sharpen(1.0).median_size(3);

        let mut expected = src.clone();
        apply_sharpen(&mut expected, 1.0);
        apply_median(&mut expected, 3);

        assert_eq!(Preprocessor::new(12, 9, params).process(&src), expected);
    }

    #[test]
    fn test_output_has_target_dimensions() {
        let src = pattern(31, 17);
        let params = ProcessingParameters::new()
            .brightness(0.3)
            .contrast(4.0)
            .sharpen(2.0)
            .median_size(9);
        let result = Preprocessor::new(100, 66, params).process(&src);
        assert_eq!(result.pixels().len(), 100 * 66);
    }

    #[test]
    #[should_panic(expected = "resize target must be positive")]
    fn test_zero_target_rejected() {
        let _ = Preprocessor::new(100, 0, ProcessingParameters::new());
    }
}
