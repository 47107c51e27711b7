use crate::error::FlagError;
use crate::services::ImageLoader;
use flag_quantize::{PixelBuffer, ReferenceMaps};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// A decoded palette together with its reference maps
#[derive(Debug, Clone)]
pub struct CachedPalette {
    /// Decoded palette, texture row order
    pub image: Arc<PixelBuffer>,
    /// Chromatic and achromatic maps built from `image`
    pub maps: Arc<ReferenceMaps>,
    /// File modification time when it was indexed
    pub modified: Option<SystemTime>,
}

/// Cache of indexed palettes, keyed by path and invalidated when the
/// file's modification time changes
pub struct PaletteCache {
    cache: Arc<RwLock<HashMap<PathBuf, CachedPalette>>>,
}

impl PaletteCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the indexed palette at `path`, decoding and indexing it on a
    /// miss or when the file changed since it was cached
    pub async fn get_or_load(
        &self,
        loader: &ImageLoader,
        path: &Path,
    ) -> Result<CachedPalette, FlagError> {
        let modified = tokio::fs::metadata(path)
            .await
            .ok()
            .and_then(|m| m.modified().ok());

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(path) {
                if entry.modified.is_some() && entry.modified == modified {
                    tracing::debug!(path = %path.display(), "Palette cache hit");
                    return Ok(entry.clone());
                }
            }
        }

        let image = Arc::new(loader.load_palette(path).await?);
        let to_index = Arc::clone(&image);
        let maps = tokio::task::spawn_blocking(move || ReferenceMaps::build(&to_index)).await?;
        tracing::info!(
            path = %path.display(),
            chromatic = maps.chromatic().len(),
            achromatic = maps.achromatic().len(),
            "Indexed palette"
        );

        let entry = CachedPalette {
            image,
            maps: Arc::new(maps),
            modified,
        };
        let mut cache = self.cache.write().await;
        cache.insert(path.to_path_buf(), entry.clone());
        Ok(entry)
    }

    /// Drop the cached entry for `path`
    pub async fn invalidate(&self, path: &Path) {
        let mut cache = self.cache.write().await;
        cache.remove(path);
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new()
    }
}
