//! FlagQuantizer builder, the primary entry point for the crate.
//!
//! [`FlagQuantizer`] wraps the whole pipeline (preprocess, match, encode)
//! behind a fluent builder around a shared palette index.

use std::sync::Arc;

use crate::buffer::PixelBuffer;
use crate::encode::EncodedFlag;
use crate::palette::{ReferenceMaps, Uv};
use crate::preprocess::{Preprocessor, ProcessingParameters};
use crate::{TARGET_HEIGHT, TARGET_WIDTH};

/// High-level quantizer: source image in, encoded flag out.
///
/// # Design
///
/// - Constructor requires indexed [`ReferenceMaps`], held in an `Arc` so
///   one palette index can back many quantizers
/// - Configuration methods consume and return `self`
/// - [`encode()`](Self::encode) takes `&self`, so the quantizer is reusable
///   and can run on several threads at once
///
/// # Example
///
/// ```
/// use flag_quantize::{FlagQuantizer, PixelBuffer, Rgba};
///
/// let palette = PixelBuffer::new(
///     2,
///     1,
///     vec![Rgba::from_u8(0, 0, 0, 255), Rgba::from_u8(255, 255, 255, 255)],
/// )
/// .unwrap();
///
/// let quantizer = FlagQuantizer::from_palette(&palette)
///     .contrast(1.8)
///     .median_size(3)
///     .resize(4, 2);
///
/// let source = PixelBuffer::filled(16, 16, Rgba::new(0.8, 0.8, 0.8, 1.0));
/// let flag = quantizer.encode(&source);
///
/// assert_eq!(flag.token_count(), 8);
/// assert!(flag.as_str().starts_with("1.000000:0.000000,"));
/// ```
#[derive(Debug, Clone)]
pub struct FlagQuantizer {
    maps: Arc<ReferenceMaps>,
    params: ProcessingParameters,
    target_width: usize,
    target_height: usize,
}

impl FlagQuantizer {
    /// Create a quantizer over an already indexed palette.
    ///
    /// Target defaults to [`TARGET_WIDTH`] x [`TARGET_HEIGHT`]; parameters
    /// default to neutral.
    pub fn new(maps: impl Into<Arc<ReferenceMaps>>) -> Self {
        Self {
            maps: maps.into(),
            params: ProcessingParameters::default(),
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
        }
    }

    /// Index `palette` and create a quantizer over it.
    pub fn from_palette(palette: &PixelBuffer) -> Self {
        Self::new(ReferenceMaps::build(palette))
    }

    /// Set the brightness offset.
    #[inline]
    pub fn brightness(mut self, amount: f32) -> Self {
        self.params = self.params.brightness(amount);
        self
    }

    /// Set the contrast factor.
    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.params = self.params.contrast(factor);
        self
    }

    /// Set the sharpen strength.
    #[inline]
    pub fn sharpen(mut self, strength: f32) -> Self {
        self.params = self.params.sharpen(strength);
        self
    }

    /// Set the median window size.
    #[inline]
    pub fn median_size(mut self, size: usize) -> Self {
        self.params = self.params.median_size(size);
        self
    }

    /// Replace all filter parameters at once.
    #[inline]
    pub fn parameters(mut self, params: ProcessingParameters) -> Self {
        self.params = params;
        self
    }

    /// Set the target resolution.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn resize(mut self, width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "resize target must be positive, got {}x{}",
            width,
            height
        );
        self.target_width = width;
        self.target_height = height;
        self
    }

    #[inline]
    pub fn reference_maps(&self) -> &ReferenceMaps {
        &self.maps
    }

    #[inline]
    pub fn params(&self) -> &ProcessingParameters {
        &self.params
    }

    /// Target dimensions `(width, height)`.
    #[inline]
    pub fn target(&self) -> (usize, usize) {
        (self.target_width, self.target_height)
    }

    /// Resize and filter `source` without matching.
    pub fn preprocess(&self, source: &PixelBuffer) -> PixelBuffer {
        Preprocessor::new(self.target_width, self.target_height, self.params).process(source)
    }

    /// Match every processed pixel, x outer and y inner.
    pub fn quantize(&self, source: &PixelBuffer) -> Vec<Uv> {
        let processed = self.preprocess(source);
        let mut uvs = Vec::with_capacity(processed.pixels().len());
        for x in 0..processed.width() {
            for y in 0..processed.height() {
                uvs.push(self.maps.match_pixel(processed.get(x, y)));
            }
        }
        uvs
    }

    /// Run the full pipeline and serialize the result.
    pub fn encode(&self, source: &PixelBuffer) -> EncodedFlag {
        EncodedFlag::encode(&self.quantize(source))
    }
}

/// One-shot pipeline at the default target resolution.
///
/// Indexes `palette`, preprocesses `source` with `params` and encodes the
/// match. Use [`FlagQuantizer`] to reuse a palette index across images.
///
/// # Example
///
/// ```
/// use flag_quantize::{process, PixelBuffer, ProcessingParameters, Rgba};
///
/// let palette = PixelBuffer::filled(1, 1, Rgba::from_u8(255, 0, 0, 255));
/// let source = PixelBuffer::filled(8, 8, Rgba::from_u8(200, 30, 30, 255));
///
/// let flag = process(&source, &palette, &ProcessingParameters::new());
/// assert_eq!(flag.token_count(), 100 * 66);
/// ```
pub fn process(
    source: &PixelBuffer,
    palette: &PixelBuffer,
    params: &ProcessingParameters,
) -> EncodedFlag {
    FlagQuantizer::from_palette(palette)
        .parameters(*params)
        .encode(source)
}
