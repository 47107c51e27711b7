//! Test application factory for integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use flagmaker::models::AppConfig;
use flagmaker::services::{FlagPipeline, InMemorySink};

use super::fixtures;

/// Scratch directory with a palette, a config pointing into it, and a
/// recording sink
pub struct TestApp {
    pub dir: TempDir,
    pub config: AppConfig,
    pub sink: Arc<InMemorySink>,
}

impl TestApp {
    /// Create a test app with the primaries palette
    pub fn new() -> Self {
        Self::with_palette(&fixtures::palettes::PRIMARIES)
    }

    pub fn with_palette(colors: &[[u8; 4]]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let palette = dir.path().join("palette.png");
        fixtures::write_palette(&palette, colors);

        let config = AppConfig {
            source_image: dir.path().join("source.png"),
            palette_image: palette,
            saved_flags_dir: dir.path().join("FlagMaker_SavedFlags"),
            active_flag_file: dir.path().join("FlagMaker_SavedFlags/active_flag.txt"),
            ..Default::default()
        };

        Self {
            dir,
            config,
            sink: Arc::new(InMemorySink::new()),
        }
    }

    /// Pipeline over this app's config that records into `sink`
    pub fn pipeline(&self) -> FlagPipeline {
        FlagPipeline::new(Arc::new(self.config.clone()), self.sink.clone()).unwrap()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a solid-color source image and return its path
    pub fn solid_source(&self, name: &str, color: [u8; 4]) -> PathBuf {
        let path = self.path(name);
        fixtures::write_solid(&path, 200, 132, color);
        path
    }

    pub fn saved_flags_dir(&self) -> &Path {
        &self.config.saved_flags_dir
    }
}
