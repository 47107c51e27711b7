//! Processing parameters and their neutral values.
//!
//! This module provides the [`ProcessingParameters`] struct for configuring
//! the filter chain applied to the resized source image.

/// User adjustments for the filter chain.
///
/// Each filter has a neutral value at which it is skipped entirely:
///
/// | Field | Neutral | Typical range |
/// |-------|---------|---------------|
/// | `brightness` | `0.0` | `-1.0..=1.0` |
/// | `contrast` | `1.0` | `1.0..=10.0` |
/// | `sharpen` | `0.0` (or below) | `0.0..=2.0` |
/// | `median_size` | `<= 1` | odd, `1..=9` |
///
/// The core does not enforce the typical ranges; any finite value produces
/// output.
///
/// # Example
///
/// ```
/// use flag_quantize::ProcessingParameters;
///
/// // Neutral parameters: every filter skipped
/// let params = ProcessingParameters::new();
/// assert!(params.is_neutral());
///
/// // Customize with builder pattern
/// let params = ProcessingParameters::new()
///     .contrast(1.8)
///     .median_size(3);
/// assert!(!params.is_neutral());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingParameters {
    /// Offset added to R, G and B.
    pub brightness: f32,

    /// Multiplier around the 0.5 midpoint.
    pub contrast: f32,

    /// Blend weight between original and 3x3-sharpened pixel.
    pub sharpen: f32,

    /// Median window side. Even values behave like the next odd value.
    pub median_size: usize,
}

impl Default for ProcessingParameters {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            sharpen: 0.0,
            median_size: 1,
        }
    }
}

impl ProcessingParameters {
    /// Neutral parameters; equivalent to `ProcessingParameters::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brightness offset.
    #[inline]
    pub fn brightness(mut self, amount: f32) -> Self {
        self.brightness = amount;
        self
    }

    /// Set the contrast factor.
    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    /// Set the sharpen strength.
    #[inline]
    pub fn sharpen(mut self, strength: f32) -> Self {
        self.sharpen = strength;
        self
    }

    /// Set the median window size.
    #[inline]
    pub fn median_size(mut self, size: usize) -> Self {
        self.median_size = size;
        self
    }

    #[inline]
    pub(crate) fn brightness_enabled(&self) -> bool {
        self.brightness != 0.0
    }

    #[inline]
    pub(crate) fn contrast_enabled(&self) -> bool {
        self.contrast != 1.0
    }

    #[inline]
    pub(crate) fn sharpen_enabled(&self) -> bool {
        self.sharpen > 0.0
    }

    #[inline]
    pub(crate) fn median_enabled(&self) -> bool {
        self.median_size > 1
    }

    /// True when every filter would be skipped.
    pub fn is_neutral(&self) -> bool {
        !(self.brightness_enabled()
            || self.contrast_enabled()
            || self.sharpen_enabled()
            || self.median_enabled())
    }
}
