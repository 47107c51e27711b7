//! Reference maps built from a palette image.
//!
//! The palette image doubles as a coordinate atlas: every distinct color it
//! contains is recorded together with the normalized position where it was
//! first seen. Colors are split by HSV saturation into a chromatic and an
//! achromatic map so grey-ish pixels never match colored entries and vice
//! versa.

use std::collections::HashSet;

use crate::buffer::PixelBuffer;
use crate::color::{saturation, Rgb8, SATURATION_THRESHOLD};

/// A normalized position in the palette atlas, both components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uv {
    pub u: f32,
    pub v: f32,
}

impl Uv {
    /// The fallback coordinate returned for an empty reference map.
    pub const ZERO: Self = Self { u: 0.0, v: 0.0 };

    #[inline]
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// UV of pixel `(x, y)` in a `width` x `height` atlas.
    ///
    /// Divides by `dimension - 1` so the last pixel on each axis maps to
    /// exactly 1.0. A one-pixel axis maps to 0.0.
    #[inline]
    pub fn from_pixel(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            u: axis_coord(x, width),
            v: axis_coord(y, height),
        }
    }
}

#[inline]
fn axis_coord(pos: usize, len: usize) -> f32 {
    if len <= 1 {
        0.0
    } else {
        pos as f32 / (len - 1) as f32
    }
}

/// One distinct palette color and where it was first seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorUvEntry {
    color: Rgb8,
    uv: Uv,
}

impl ColorUvEntry {
    #[inline]
    pub fn new(color: Rgb8, uv: Uv) -> Self {
        Self { color, uv }
    }

    #[inline]
    pub fn color(&self) -> Rgb8 {
        self.color
    }

    #[inline]
    pub fn uv(&self) -> Uv {
        self.uv
    }
}

/// Insertion-ordered list of [`ColorUvEntry`].
///
/// Order matters: nearest-color ties resolve to the earliest entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMap {
    entries: Vec<ColorUvEntry>,
}

impl ReferenceMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end.
    #[inline]
    pub fn push(&mut self, entry: ColorUvEntry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[ColorUvEntry] {
        &self.entries
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ColorUvEntry> {
        self.entries.iter()
    }
}

impl FromIterator<ColorUvEntry> for ReferenceMap {
    fn from_iter<I: IntoIterator<Item = ColorUvEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ReferenceMap {
    type Item = &'a ColorUvEntry;
    type IntoIter = std::slice::Iter<'a, ColorUvEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The chromatic and achromatic reference maps of one palette image.
///
/// Built once per palette and read-only afterwards; cheap to share behind an
/// `Arc` across concurrent quantizations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMaps {
    chromatic: ReferenceMap,
    achromatic: ReferenceMap,
}

impl ReferenceMaps {
    /// Assemble from prebuilt maps.
    pub fn from_maps(chromatic: ReferenceMap, achromatic: ReferenceMap) -> Self {
        Self {
            chromatic,
            achromatic,
        }
    }

    /// Index a palette image.
    ///
    /// 1. Force every pixel opaque (RGB untouched), so alpha never affects
    ///    color identity.
    /// 2. Scan rows in order (y outer, x inner, both ascending).
    /// 3. Skip any pixel whose 8-bit color was already seen; the first
    ///    position of a color wins.
    /// 4. Record UV `(x / (w - 1), y / (h - 1))`.
    /// 5. Saturation strictly below [`SATURATION_THRESHOLD`] goes to the
    ///    achromatic map, everything else to the chromatic map.
    ///
    /// Membership is tracked in a set; entry order comes only from the scan,
    /// so the result is deterministic.
    ///
    /// # Example
    ///
    /// ```
    /// use flag_quantize::{PixelBuffer, ReferenceMaps, Rgba};
    ///
    /// let red = Rgba::from_u8(255, 0, 0, 255);
    /// let grey = Rgba::from_u8(128, 128, 128, 255);
    /// let palette = PixelBuffer::new(3, 1, vec![red, grey, red]).unwrap();
    ///
    /// let maps = ReferenceMaps::build(&palette);
    /// assert_eq!(maps.chromatic().len(), 1);
    /// assert_eq!(maps.achromatic().len(), 1);
    /// ```
    pub fn build(palette: &PixelBuffer) -> Self {
        let width = palette.width();
        let height = palette.height();
        // Membership only, never iterated: entry order comes from the scan
        // pushing into the maps' Vecs.
        let mut seen: HashSet<Rgb8> = HashSet::new();
        let mut chromatic = ReferenceMap::new();
        let mut achromatic = ReferenceMap::new();

        for y in 0..height {
            for x in 0..width {
                let sample = palette.get(x, y).with_opaque_alpha().clamped();
                let color = sample.to_rgb8();
                if !seen.insert(color) {
                    continue;
                }

                let entry = ColorUvEntry::new(color, Uv::from_pixel(x, y, width, height));
                if saturation(sample) < SATURATION_THRESHOLD {
                    achromatic.push(entry);
                } else {
                    chromatic.push(entry);
                }
            }
        }

        Self {
            chromatic,
            achromatic,
        }
    }

    /// Entries with saturation `>= 0.1`.
    #[inline]
    pub fn chromatic(&self) -> &ReferenceMap {
        &self.chromatic
    }

    /// Entries with saturation `< 0.1`.
    #[inline]
    pub fn achromatic(&self) -> &ReferenceMap {
        &self.achromatic
    }

    /// Total number of distinct palette colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.chromatic.len() + self.achromatic.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
