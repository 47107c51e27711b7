//! Bilinear image resizing.
//!
//! Each destination pixel center is mapped into the source's normalized
//! coordinate space and the four nearest source samples are blended. Source
//! coordinates are clamped at the edges, so borders replicate rather than
//! wrap. Like a GPU bilinear blit, large downscales take only four taps per
//! output pixel.

use crate::buffer::PixelBuffer;
use crate::color::Rgba;

/// Resize `source` to `new_width` x `new_height` with bilinear filtering.
///
/// Deterministic for a fixed input and target size. Resizing to the source's
/// own dimensions returns an identical buffer.
///
/// # Panics
///
/// Panics if either target dimension is zero. Target sizes are program
/// constants, so a zero here is a contract violation.
pub fn resize_bilinear(source: &PixelBuffer, new_width: usize, new_height: usize) -> PixelBuffer {
    assert!(
        new_width > 0 && new_height > 0,
        "resize target must be positive, got {}x{}",
        new_width,
        new_height
    );

    if source.width() == new_width && source.height() == new_height {
        return source.clone();
    }

    let x_taps = axis_taps(source.width(), new_width);
    let y_taps = axis_taps(source.height(), new_height);

    let mut pixels = Vec::with_capacity(new_width * new_height);
    for &(y0, y1, fy) in &y_taps {
        for &(x0, x1, fx) in &x_taps {
            let top = blend(source.get(x0, y0), source.get(x1, y0), fx);
            let bottom = blend(source.get(x0, y1), source.get(x1, y1), fx);
            pixels.push(blend(top, bottom, fy));
        }
    }

    PixelBuffer::from_raw(new_width, new_height, pixels)
}

/// Precompute `(lower index, upper index, weight of upper)` for every
/// destination coordinate along one axis.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = src_len as f32 / dst_len as f32;
    let max = (src_len - 1) as f32;
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f32 + 0.5) * scale - 0.5).clamp(0.0, max);
            let lower = pos.floor() as usize;
            let upper = (lower + 1).min(src_len - 1);
            (lower, upper, pos - lower as f32)
        })
        .collect()
}

#[inline]
fn blend(a: Rgba, b: Rgba, t: f32) -> Rgba {
    Rgba::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
