use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use flag_quantize::{EncodedFlag, FlagPreview, FlagQuantizer, PixelBuffer};
use tokio::task::JoinSet;

use crate::error::FlagError;
use crate::models::AppConfig;
use crate::rendering::encode_preview_png;
use crate::services::{CachedPalette, FlagSink, FlagStore, ImageLoader, PaletteCache};

/// Outcome of generating one flag
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub source: PathBuf,
    /// Where the flag was saved
    pub saved_to: PathBuf,
    pub flag: EncodedFlag,
    /// Whether the flag was handed to the sink
    pub applied: bool,
    /// Load + quantize + save time
    pub elapsed: Duration,
}

/// Orchestrates load → index → quantize → save → set active
pub struct FlagPipeline {
    config: Arc<AppConfig>,
    loader: ImageLoader,
    cache: PaletteCache,
    store: FlagStore,
    sink: Arc<dyn FlagSink>,
    apply: bool,
}

impl FlagPipeline {
    pub fn new(config: Arc<AppConfig>, sink: Arc<dyn FlagSink>) -> Result<Self, FlagError> {
        let store =
            FlagStore::new(&config.saved_flags_dir)?.excluding(&config.active_flag_file);
        Ok(Self {
            config,
            loader: ImageLoader::new(),
            cache: PaletteCache::new(),
            store,
            sink,
            apply: true,
        })
    }

    /// Whether generated flags are handed to the sink (default true)
    pub fn with_apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &FlagStore {
        &self.store
    }

    pub fn cache(&self) -> &PaletteCache {
        &self.cache
    }

    /// Indexed palette from the configured path
    pub async fn palette(&self) -> Result<CachedPalette, FlagError> {
        self.cache
            .get_or_load(&self.loader, &self.config.palette_image)
            .await
    }

    fn quantizer(&self, palette: &CachedPalette) -> FlagQuantizer {
        FlagQuantizer::new(Arc::clone(&palette.maps))
            .parameters(self.config.adjustments.to_parameters())
            .resize(self.config.target.width, self.config.target.height)
    }

    /// Generate, save and (unless disabled) apply a flag for one source
    pub async fn generate(&self, source: &Path) -> Result<GenerateReport, FlagError> {
        let start = Instant::now();
        tracing::info!(source = %source.display(), "Generating flag");

        let (image, palette) = tokio::try_join!(self.loader.load_source(source), self.palette())?;
        let flag = quantize(self.quantizer(&palette), image).await?;
        let saved_to = self.store.save(source, &flag).await?;

        let applied = if self.apply {
            self.sink.set_active(&flag).await?;
            true
        } else {
            false
        };

        let elapsed = start.elapsed();
        tracing::info!(
            source = %source.display(),
            saved_to = %saved_to.display(),
            applied,
            elapsed_ms = elapsed.as_millis() as u64,
            "Flag generated"
        );

        Ok(GenerateReport {
            source: source.to_path_buf(),
            saved_to,
            flag,
            applied,
            elapsed,
        })
    }

    /// Generate flags for several sources concurrently against one palette
    /// index.
    ///
    /// Results keep input order. A palette failure fails the whole batch;
    /// a source failure only fails its own entry. When applying, the last
    /// successful flag in input order becomes active.
    pub async fn generate_many(
        &self,
        sources: &[PathBuf],
    ) -> Result<Vec<Result<GenerateReport, FlagError>>, FlagError> {
        let palette = self.palette().await?;
        tracing::info!(count = sources.len(), "Generating flags");

        let mut tasks = JoinSet::new();
        let mut order = HashMap::new();
        for (index, source) in sources.iter().enumerate() {
            let loader = self.loader;
            let store = self.store.clone();
            let quantizer = self.quantizer(&palette);
            let source = source.clone();

            let handle = tasks.spawn(async move {
                let start = Instant::now();
                let image = loader.load_source(&source).await?;
                let flag = quantize(quantizer, image).await?;
                let saved_to = store.save(&source, &flag).await?;
                Ok::<_, FlagError>(GenerateReport {
                    source,
                    saved_to,
                    flag,
                    applied: false,
                    elapsed: start.elapsed(),
                })
            });
            order.insert(handle.id(), index);
        }

        let mut results: Vec<Option<Result<GenerateReport, FlagError>>> =
            (0..sources.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (e.id(), Err(FlagError::from(e))),
            };
            if let Some(&index) = order.get(&id) {
                if let Err(e) = &result {
                    tracing::warn!(source = %sources[index].display(), %e, "Flag generation failed");
                }
                results[index] = Some(result);
            }
        }

        let mut results: Vec<Result<GenerateReport, FlagError>> = results
            .into_iter()
            .map(|r| r.unwrap_or_else(|| Err(FlagError::Task("task result missing".to_string()))))
            .collect();

        if self.apply {
            if let Some(Ok(report)) = results.iter_mut().rev().find(|r| r.is_ok()) {
                self.sink.set_active(&report.flag).await?;
                report.applied = true;
            }
        }

        Ok(results)
    }

    /// Load a saved flag and make it the active one
    pub async fn apply_saved(&self, name_or_path: &str) -> Result<EncodedFlag, FlagError> {
        let flag = self.store.load(name_or_path).await?;
        self.sink.set_active(&flag).await?;
        tracing::info!(name = name_or_path, tokens = flag.token_count(), "Applied saved flag");
        Ok(flag)
    }

    /// Render a saved flag back through the palette as a PNG
    pub async fn preview(&self, name_or_path: &str, scale: u32) -> Result<Vec<u8>, FlagError> {
        let flag = self.store.load(name_or_path).await?;
        let palette = self.palette().await?;
        let uvs = flag.parse()?;

        let target = self.config.target;
        if uvs.len() != target.pixel_count() {
            return Err(FlagError::Preview(format!(
                "flag has {} tokens, a {} flag needs {}",
                uvs.len(),
                target,
                target.pixel_count()
            )));
        }

        let preview = FlagPreview::render(&uvs, target.width, target.height, &palette.image)
            .map_err(|e| FlagError::Preview(e.to_string()))?;
        encode_preview_png(&preview, scale)
    }
}

/// Run the quantizer on the blocking pool
async fn quantize(quantizer: FlagQuantizer, image: PixelBuffer) -> Result<EncodedFlag, FlagError> {
    let flag = tokio::task::spawn_blocking(move || quantizer.encode(&image)).await?;
    Ok(flag)
}
