//! HSV saturation for chromatic/achromatic routing.

use super::Rgba;

/// Saturation below this value routes a color to the achromatic map.
///
/// The comparison is strict: a saturation of exactly `0.1` is chromatic.
pub const SATURATION_THRESHOLD: f32 = 0.1;

/// HSV saturation of a sample's RGB channels.
///
/// `(max - min) / max`, and `0.0` for black. Alpha is ignored. The input is
/// expected to be in `0.0..=1.0`; callers clamp filtered samples first.
///
/// # Example
/// ```
/// use flag_quantize::{saturation, Rgba};
///
/// assert_eq!(saturation(Rgba::new(1.0, 0.0, 0.0, 1.0)), 1.0);
/// assert_eq!(saturation(Rgba::new(0.5, 0.5, 0.5, 1.0)), 0.0);
/// ```
#[inline]
pub fn saturation(color: Rgba) -> f32 {
    let max = color.r.max(color.g).max(color.b);
    if max <= 0.0 {
        return 0.0;
    }
    let min = color.r.min(color.g).min(color.b);
    (max - min) / max
}
