//! Pixel filters applied after resize.
//!
//! Every filter is a full-buffer pass that leaves the dimensions untouched.
//! Brightness and contrast are pointwise; sharpen and median read from a
//! snapshot of the input and write a whole replacement array. None of them
//! clamp: values outside `0.0..=1.0` flow through to the final conversion.

use crate::buffer::PixelBuffer;
use crate::color::Rgba;

/// 3x3 sharpen kernel, row-major.
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Add `amount` to the R, G and B channels of every pixel. Alpha untouched.
pub fn apply_brightness(buffer: &mut PixelBuffer, amount: f32) {
    buffer.map_in_place(|px| Rgba::new(px.r + amount, px.g + amount, px.b + amount, px.a));
}

/// Scale R, G and B around the 0.5 midpoint: `0.5 + factor * (v - 0.5)`.
pub fn apply_contrast(buffer: &mut PixelBuffer, factor: f32) {
    const MIDPOINT: f32 = 0.5;
    buffer.map_in_place(|px| {
        Rgba::new(
            MIDPOINT + factor * (px.r - MIDPOINT),
            MIDPOINT + factor * (px.g - MIDPOINT),
            MIDPOINT + factor * (px.b - MIDPOINT),
            px.a,
        )
    });
}

/// Convolve interior pixels with [`SHARPEN_KERNEL`] and blend the result
/// with the original by `amount` (`lerp(original, convolved, amount)`).
///
/// The first and last row and column are copied unchanged. Alpha always
/// comes from the original pixel.
pub fn apply_sharpen(buffer: &mut PixelBuffer, amount: f32) {
    let width = buffer.width();
    let height = buffer.height();
    let original = buffer.pixels();
    let mut sharpened = Vec::with_capacity(original.len());

    for y in 0..height {
        for x in 0..width {
            let center = original[y * width + x];
            if y == 0 || y + 1 >= height || x == 0 || x + 1 >= width {
                sharpened.push(center);
                continue;
            }

            let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
            let mut k = 0;
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    let weight = SHARPEN_KERNEL[k];
                    let c = original[ny * width + nx];
                    r += c.r * weight;
                    g += c.g * weight;
                    b += c.b * weight;
                    k += 1;
                }
            }

            sharpened.push(center.lerp_rgb(Rgba::new(r, g, b, center.a), amount));
        }
    }

    buffer.replace_pixels(sharpened);
}

/// Per-channel median over a square window centered on each pixel.
///
/// The window reaches `size / 2` pixels in each direction, with coordinates
/// clamped to the buffer (edge replication). Each channel's values are
/// sorted independently and the element at `count / 2` is taken. Alpha comes
/// from the original center pixel.
pub fn apply_median(buffer: &mut PixelBuffer, size: usize) {
    let width = buffer.width();
    let height = buffer.height();
    let half = (size / 2) as isize;
    let original = buffer.pixels();

    let window = (2 * half as usize + 1).pow(2);
    let mut rs = Vec::with_capacity(window);
    let mut gs = Vec::with_capacity(window);
    let mut bs = Vec::with_capacity(window);
    let mut filtered = Vec::with_capacity(original.len());

    for y in 0..height {
        for x in 0..width {
            rs.clear();
            gs.clear();
            bs.clear();
            for ky in -half..=half {
                let ny = clamp_coord(y as isize + ky, height);
                for kx in -half..=half {
                    let nx = clamp_coord(x as isize + kx, width);
                    let c = original[ny * width + nx];
                    rs.push(c.r);
                    gs.push(c.g);
                    bs.push(c.b);
                }
            }

            rs.sort_by(f32::total_cmp);
            gs.sort_by(f32::total_cmp);
            bs.sort_by(f32::total_cmp);
            let mid = rs.len() / 2;
            filtered.push(Rgba::new(rs[mid], gs[mid], bs[mid], original[y * width + x].a));
        }
    }

    buffer.replace_pixels(filtered);
}

#[inline]
fn clamp_coord(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}
