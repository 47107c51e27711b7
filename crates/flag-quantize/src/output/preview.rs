//! Re-render an encoded flag through its palette.
//!
//! [`FlagPreview`] answers "what would the host draw for this flag": every
//! UV is turned back into the palette pixel it addresses. Useful for
//! checking a generated or saved flag without the host.

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::Rgb8;
use crate::palette::Uv;

/// RGB reconstruction of a flag, in texture row order (row 0 is the row
/// `v = 0` refers to).
///
/// # Example
///
/// ```
/// use flag_quantize::{FlagPreview, PixelBuffer, Rgb8, Rgba, Uv};
///
/// let palette = PixelBuffer::new(
///     2,
///     1,
///     vec![Rgba::from_u8(0, 0, 0, 255), Rgba::from_u8(255, 255, 255, 255)],
/// )
/// .unwrap();
///
/// // 1x2 flag, column-major: (x=0, y=0) then (x=0, y=1)
/// let uvs = [Uv::new(1.0, 0.0), Uv::new(0.0, 0.0)];
/// let preview = FlagPreview::render(&uvs, 1, 2, &palette).unwrap();
///
/// assert_eq!(preview.color_at(0, 0), Rgb8::new(255, 255, 255));
/// assert_eq!(preview.color_at(0, 1), Rgb8::new(0, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagPreview {
    width: usize,
    height: usize,
    /// Row-major RGB triples.
    rgb: Vec<u8>,
}

impl FlagPreview {
    /// Sample `palette` at every UV of a `width` x `height` flag.
    ///
    /// `uvs` must be in matching order (column-major: x outer, y inner) and
    /// hold exactly `width * height` entries. Each UV is mapped to palette
    /// pixel `(round(u * (pw - 1)), round(v * (ph - 1)))`, the inverse of
    /// the mapping used when the palette was indexed.
    pub fn render(
        uvs: &[Uv],
        width: usize,
        height: usize,
        palette: &PixelBuffer,
    ) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        let expected = width * height;
        if uvs.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: uvs.len(),
            });
        }

        let mut rgb = vec![0u8; expected * 3];
        for (i, uv) in uvs.iter().enumerate() {
            let x = i / height;
            let y = i % height;
            let [r, g, b] = sample_palette(palette, *uv).to_bytes();
            let offset = (y * width + x) * 3;
            rgb[offset..offset + 3].copy_from_slice(&[r, g, b]);
        }

        Ok(Self { width, height, rgb })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// RGB bytes, row-major, texture row order.
    #[inline]
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// RGB bytes with the last texture row first, the layout image files
    /// use.
    pub fn to_rgb_top_down(&self) -> Vec<u8> {
        let stride = self.width * 3;
        self.rgb
            .chunks_exact(stride)
            .rev()
            .flatten()
            .copied()
            .collect()
    }

    /// Color at `(x, y)` in texture coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn color_at(&self, x: usize, y: usize) -> Rgb8 {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside the {}x{} preview",
            x,
            y,
            self.width,
            self.height
        );
        let offset = (y * self.width + x) * 3;
        Rgb8::new(self.rgb[offset], self.rgb[offset + 1], self.rgb[offset + 2])
    }
}

fn sample_palette(palette: &PixelBuffer, uv: Uv) -> Rgb8 {
    let px = axis_pixel(uv.u, palette.width());
    let py = axis_pixel(uv.v, palette.height());
    palette.get(px, py).clamped().to_rgb8()
}

#[inline]
fn axis_pixel(coord: f32, len: usize) -> usize {
    let max = (len - 1) as f32;
    (coord.clamp(0.0, 1.0) * max).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn quad_palette() -> PixelBuffer {
        PixelBuffer::new(
            2,
            2,
            vec![
                Rgba::from_u8(255, 0, 0, 255),
                Rgba::from_u8(0, 255, 0, 255),
                Rgba::from_u8(0, 0, 255, 255),
                Rgba::from_u8(255, 255, 0, 255),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_render_reorders_column_major() {
        // 2x2 flag, column-major order: (0,0) (0,1) (1,0) (1,1)
        let uvs = [
            Uv::new(0.0, 0.0),
            Uv::new(1.0, 0.0),
            Uv::new(0.0, 1.0),
            Uv::new(1.0, 1.0),
        ];
        let preview = FlagPreview::render(&uvs, 2, 2, &quad_palette()).unwrap();

        assert_eq!(preview.color_at(0, 0), Rgb8::new(255, 0, 0));
        assert_eq!(preview.color_at(0, 1), Rgb8::new(0, 255, 0));
        assert_eq!(preview.color_at(1, 0), Rgb8::new(0, 0, 255));
        assert_eq!(preview.color_at(1, 1), Rgb8::new(255, 255, 0));
    }

    #[test]
    fn test_uv_rounds_to_nearest_pixel() {
        let uvs = [Uv::new(0.49, 0.51)];
        let preview = FlagPreview::render(&uvs, 1, 1, &quad_palette()).unwrap();
        // u -> 0, v -> 1
        assert_eq!(preview.color_at(0, 0), Rgb8::new(0, 0, 255));
    }

    #[test]
    #[should_panic(expected = "outside the 2x1 preview")]
    fn test_color_at_rejects_column_past_width() {
        let uvs = [Uv::new(0.0, 0.0), Uv::new(1.0, 0.0)];
        let preview = FlagPreview::render(&uvs, 2, 1, &quad_palette()).unwrap();
        // Would otherwise wrap into the next row's memory
        preview.color_at(2, 0);
    }

    #[test]
    fn test_top_down_reverses_rows() {
        let uvs = [Uv::new(0.0, 0.0), Uv::new(1.0, 1.0)];
        let preview = FlagPreview::render(&uvs, 1, 2, &quad_palette()).unwrap();
        assert_eq!(preview.rgb(), &[255, 0, 0, 255, 255, 0]);
        assert_eq!(preview.to_rgb_top_down(), vec![255, 255, 0, 255, 0, 0]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = FlagPreview::render(&[Uv::ZERO; 3], 2, 2, &quad_palette()).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(matches!(
            FlagPreview::render(&[], 0, 5, &quad_palette()),
            Err(BufferError::ZeroArea { .. })
        ));
    }

    #[test]
    fn test_single_pixel_palette() {
        let palette = PixelBuffer::filled(1, 1, Rgba::from_u8(9, 8, 7, 255));
        let preview = FlagPreview::render(&[Uv::new(1.0, 1.0)], 1, 1, &palette).unwrap();
        assert_eq!(preview.color_at(0, 0), Rgb8::new(9, 8, 7));
    }
}
