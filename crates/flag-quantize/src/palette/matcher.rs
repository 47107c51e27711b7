//! Nearest-color lookup against a [`ReferenceMap`].
//!
//! Distance is squared Euclidean over 8-bit RGB. The search is linear and
//! stops early on an exact match; ties go to the earliest entry.

use crate::color::{saturation, Rgb8, Rgba, SATURATION_THRESHOLD};

use super::reference::{ReferenceMap, ReferenceMaps, Uv};

/// UV of the entry in `map` closest to `color`.
///
/// Returns [`Uv::ZERO`] when `map` is empty.
///
/// # Example
///
/// ```
/// use flag_quantize::{find_closest_uv, ColorUvEntry, ReferenceMap, Rgb8, Uv};
///
/// let map: ReferenceMap = [
///     ColorUvEntry::new(Rgb8::new(0, 0, 0), Uv::new(0.0, 0.0)),
///     ColorUvEntry::new(Rgb8::new(255, 255, 255), Uv::new(1.0, 0.0)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(find_closest_uv(Rgb8::new(200, 210, 190), &map), Uv::new(1.0, 0.0));
/// ```
pub fn find_closest_uv(color: Rgb8, map: &ReferenceMap) -> Uv {
    let mut best = Uv::ZERO;
    let mut best_distance = u32::MAX;

    for entry in map {
        let distance = color.distance_sq(entry.color());
        if distance < best_distance {
            best_distance = distance;
            best = entry.uv();
            if distance == 0 {
                break;
            }
        }
    }

    best
}

/// True when `sample` belongs to the achromatic map.
///
/// `sample` should already be clamped; see [`ReferenceMaps::match_pixel`].
#[inline]
pub fn is_achromatic(sample: Rgba) -> bool {
    saturation(sample) < SATURATION_THRESHOLD
}

impl ReferenceMaps {
    /// The map a sample is matched against, chosen by its saturation.
    #[inline]
    pub fn map_for(&self, sample: Rgba) -> &ReferenceMap {
        if is_achromatic(sample) {
            self.achromatic()
        } else {
            self.chromatic()
        }
    }

    /// Match one processed pixel to a palette coordinate.
    ///
    /// The sample is clamped to `0.0..=1.0` first; classification and
    /// distance both use the clamped value. An achromatic sample never
    /// falls back to the chromatic map (and vice versa), so an empty map
    /// yields [`Uv::ZERO`].
    pub fn match_pixel(&self, sample: Rgba) -> Uv {
        let sample = sample.clamped();
        find_closest_uv(sample.to_rgb8(), self.map_for(sample))
    }
}
