//! Owned pixel buffer with explicit index arithmetic.
//!
//! [`PixelBuffer`] is the one image representation used by every stage of the
//! pipeline: a dense row-major `Vec<Rgba>` with fixed dimensions. Stages read
//! it through [`PixelBuffer::get`] / [`PixelBuffer::index`] and write whole
//! replacement sample arrays; the sample count never changes.

use std::fmt;

use crate::color::Rgba;

/// Error constructing a [`PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero
    ZeroArea {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Sample (or byte) count does not match the dimensions
    LengthMismatch {
        /// Expected element count
        expected: usize,
        /// Provided element count
        actual: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::ZeroArea { width, height } => {
                write!(f, "image has zero area: {}x{}", width, height)
            }
            BufferError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "pixel data length mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// A width x height image of [`Rgba`] samples in row-major order.
///
/// # Invariants
///
/// - `width > 0` and `height > 0`
/// - `pixels.len() == width * height` at all times
///
/// # Example
///
/// ```
/// use flag_quantize::{PixelBuffer, Rgba};
///
/// let buffer = PixelBuffer::filled(3, 2, Rgba::BLACK);
/// assert_eq!(buffer.width(), 3);
/// assert_eq!(buffer.height(), 2);
/// assert_eq!(buffer.pixels().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Wrap an existing sample vector.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroArea`] if either dimension is zero,
    /// [`BufferError::LengthMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        let expected = width * height;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap samples whose length the caller has already computed from the
    /// dimensions.
    pub(crate) fn from_raw(width: usize, height: usize, pixels: Vec<Rgba>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a buffer from interleaved RGBA8 bytes (4 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Same conditions as [`PixelBuffer::new`]; the expected length is
    /// `width * height * 4` bytes.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::from_u8(px[0], px[1], px[2], px[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A buffer where every sample is `color`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        assert!(
            width > 0 && height > 0,
            "PixelBuffer dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All samples, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Flat index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Sample at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Apply `f` to every sample in place.
    #[inline]
    pub fn map_in_place(&mut self, f: impl Fn(Rgba) -> Rgba) {
        for px in self.pixels.iter_mut() {
            *px = f(*px);
        }
    }

    /// Replace the whole sample array.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len()` differs from the current sample count; the
    /// buffer is never resized in place.
    pub fn replace_pixels(&mut self, pixels: Vec<Rgba>) {
        assert_eq!(
            pixels.len(),
            self.pixels.len(),
            "replacement must keep {}x{} samples",
            self.width,
            self.height
        );
        self.pixels = pixels;
    }

    /// Copy with rows in reverse order (top row becomes bottom row).
    pub fn flipped_vertical(&self) -> Self {
        let pixels = self
            .pixels
            .chunks_exact(self.width)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
