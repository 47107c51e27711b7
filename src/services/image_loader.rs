use crate::error::FlagError;
use flag_quantize::PixelBuffer;
use image::ImageReader;
use std::path::{Path, PathBuf};

/// File extensions accepted as source or palette images
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Decodes image files into texture-oriented pixel buffers.
///
/// Files store their top row first; the buffers produced here store the
/// bottom row first, so `v = 0` addresses the bottom edge of the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader;

impl ImageLoader {
    pub fn new() -> Self {
        Self
    }

    /// Decode an image synchronously
    pub fn load(&self, path: &Path) -> Result<PixelBuffer, FlagError> {
        decode(path).map_err(|reason| {
            FlagError::InvalidImage(format!("{}: {reason}", path.display()))
        })
    }

    /// Decode the source image on the blocking pool
    pub async fn load_source(&self, path: &Path) -> Result<PixelBuffer, FlagError> {
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || decode(&owned)).await?;
        result.map_err(|reason| {
            tracing::warn!(path = %path.display(), %reason, "Source image unavailable");
            FlagError::SourceUnavailable {
                path: path.to_path_buf(),
                reason,
            }
        })
    }

    /// Decode the palette image on the blocking pool
    pub async fn load_palette(&self, path: &Path) -> Result<PixelBuffer, FlagError> {
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || decode(&owned)).await?;
        result.map_err(|reason| {
            tracing::warn!(path = %path.display(), %reason, "Palette image unavailable");
            FlagError::PaletteUnavailable {
                path: path.to_path_buf(),
                reason,
            }
        })
    }

    /// Decode source and palette concurrently
    pub async fn load_pair(
        &self,
        source: &Path,
        palette: &Path,
    ) -> Result<(PixelBuffer, PixelBuffer), FlagError> {
        tokio::try_join!(self.load_source(source), self.load_palette(palette))
    }
}

fn decode(path: &Path) -> Result<PixelBuffer, String> {
    let image = ImageReader::open(path)
        .map_err(|e| e.to_string())?
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::from_rgba8(width as usize, height as usize, rgba.as_raw())
        .map_err(|e| e.to_string())?;

    tracing::debug!(path = %path.display(), width, height, "Decoded image");
    Ok(buffer.flipped_vertical())
}

/// Whether `path` has one of the supported image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Expand directories to the supported images they contain (sorted by
/// name, non-recursive); files are passed through unchanged.
pub fn expand_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, FlagError> {
    let mut sources = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_supported_image(path))
                .collect();
            found.sort();
            tracing::debug!(dir = %input.display(), count = found.len(), "Expanded directory");
            sources.extend(found);
        } else {
            sources.push(input.clone());
        }
    }
    Ok(sources)
}
