use crate::error::FlagError;
use flag_quantize::FlagPreview;
use std::io::Cursor;

/// Largest accepted upscale factor
pub const MAX_SCALE: u32 = 16;

/// Encode a flag preview as an RGB8 PNG, top row first, each pixel
/// repeated `scale` times in both directions.
pub fn encode_preview_png(preview: &FlagPreview, scale: u32) -> Result<Vec<u8>, FlagError> {
    if scale == 0 || scale > MAX_SCALE {
        return Err(FlagError::Preview(format!(
            "scale must be between 1 and {MAX_SCALE}, got {scale}"
        )));
    }

    let rows = preview.to_rgb_top_down();
    let data = upscale_nearest(&rows, preview.width(), scale as usize);
    let width = u32::try_from(preview.width() * scale as usize)
        .map_err(|e| FlagError::Preview(e.to_string()))?;
    let height = u32::try_from(preview.height() * scale as usize)
        .map_err(|e| FlagError::Preview(e.to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| FlagError::Preview(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| FlagError::Preview(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Repeat every RGB pixel `scale` times horizontally and every row
/// `scale` times vertically.
fn upscale_nearest(rgb: &[u8], width: usize, scale: usize) -> Vec<u8> {
    if scale == 1 {
        return rgb.to_vec();
    }
    let mut out = Vec::with_capacity(rgb.len() * scale * scale);
    for row in rgb.chunks_exact(width * 3) {
        let mut wide = Vec::with_capacity(row.len() * scale);
        for px in row.chunks_exact(3) {
            for _ in 0..scale {
                wide.extend_from_slice(px);
            }
        }
        for _ in 0..scale {
            out.extend_from_slice(&wide);
        }
    }
    out
}
