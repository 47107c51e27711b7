//! Test fixtures and constants.

use std::path::Path;

/// RGBA colors used in fixture images
pub mod colors {
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const GREEN: [u8; 4] = [0, 255, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
}

/// Single-row palettes and the UV token each color indexes to
pub mod palettes {
    use super::colors::*;

    /// Red, green, blue, black, white; u = index / 4
    pub const PRIMARIES: [[u8; 4]; 5] = [RED, GREEN, BLUE, BLACK, WHITE];

    pub const RED_TOKEN: &str = "0.000000:0.000000";
    pub const GREEN_TOKEN: &str = "0.250000:0.000000";
    pub const BLUE_TOKEN: &str = "0.500000:0.000000";
    pub const BLACK_TOKEN: &str = "0.750000:0.000000";
    pub const WHITE_TOKEN: &str = "1.000000:0.000000";
}

/// Write a single-row palette image
pub fn write_palette(path: &Path, colors: &[[u8; 4]]) {
    let mut img = image::RgbaImage::new(colors.len() as u32, 1);
    for (x, color) in colors.iter().enumerate() {
        img.put_pixel(x as u32, 0, image::Rgba(*color));
    }
    img.save(path).unwrap();
}

/// Write an image filled with one color
pub fn write_solid(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    image::RgbaImage::from_pixel(width, height, image::Rgba(color))
        .save(path)
        .unwrap();
}

/// Write an image whose left half is `left` and right half is `right`
pub fn write_split_vertical(path: &Path, width: u32, height: u32, left: [u8; 4], right: [u8; 4]) {
    let img = image::RgbaImage::from_fn(width, height, |x, _| {
        image::Rgba(if x < width / 2 { left } else { right })
    });
    img.save(path).unwrap();
}

/// Write an image whose top half is `top` and bottom half is `bottom`
pub fn write_split_horizontal(path: &Path, width: u32, height: u32, top: [u8; 4], bottom: [u8; 4]) {
    let img = image::RgbaImage::from_fn(width, height, |_, y| {
        image::Rgba(if y < height / 2 { top } else { bottom })
    });
    img.save(path).unwrap();
}
