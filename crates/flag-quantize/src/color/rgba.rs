//! RGBA working samples and 8-bit colors.

/// A floating-point RGBA sample.
///
/// Channels are nominally in `0.0..=1.0`, but intermediate filter math
/// (brightness, contrast, sharpen) is allowed to leave that range. Values
/// are clamped only when converted with [`Rgba::clamped`] or
/// [`Rgba::to_rgb8`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a new sample from float values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a sample from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use flag_quantize::Rgba;
    /// let red = Rgba::from_u8(255, 0, 0, 255);
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.a, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create an opaque sample from an 8-bit color.
    #[inline]
    pub fn opaque(color: Rgb8) -> Self {
        Self::from_u8(color.r, color.g, color.b, 255)
    }

    /// Copy of this sample with alpha forced to 1.0, RGB untouched.
    #[inline]
    pub fn with_opaque_alpha(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// Copy of this sample with every channel clamped to `0.0..=1.0`.
    ///
    /// NaN channels clamp to 0.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: clamp_unit(self.r),
            g: clamp_unit(self.g),
            b: clamp_unit(self.b),
            a: clamp_unit(self.a),
        }
    }

    /// Convert to an 8-bit RGB color, dropping alpha.
    ///
    /// Rounds and clamps each channel to `0..=255`.
    ///
    /// # Example
    /// ```
    /// use flag_quantize::{Rgb8, Rgba};
    /// let color = Rgba::new(1.0, 0.5, -0.2, 0.3);
    /// assert_eq!(color.to_rgb8(), Rgb8::new(255, 128, 0));
    /// ```
    #[inline]
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8::new(
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
        )
    }

    /// Linear interpolation `self + (other - self) * t` on RGB; alpha is kept
    /// from `self`. `t` is not clamped.
    #[inline]
    pub fn lerp_rgb(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a,
        }
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
fn channel_to_u8(v: f32) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}

/// An 8-bit-per-channel RGB color. Alpha plays no part in color identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in 8-bit RGB space.
    ///
    /// Maximum value is `3 * 255^2`, which fits comfortably in `u32`.
    #[inline]
    pub fn distance_sq(self, other: Self) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Byte array `[R, G, B]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}
