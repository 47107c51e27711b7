pub mod flag_pipeline;
pub mod flag_sink;
pub mod flag_store;
pub mod image_loader;
pub mod palette_cache;

pub use flag_pipeline::{FlagPipeline, GenerateReport};
pub use flag_sink::{ActiveFlagFile, FlagSink, InMemorySink};
pub use flag_store::{FlagStore, SavedFlag, FLAG_EXTENSION};
pub use image_loader::{expand_sources, is_supported_image, ImageLoader, SUPPORTED_EXTENSIONS};
pub use palette_cache::{CachedPalette, PaletteCache};
