pub mod config;
pub mod target_spec;

pub use config::{Adjustments, AppConfig, ConfigSource, CONFIG_ENV, DEFAULT_CONFIG_FILE};
pub use target_spec::TargetSpec;
