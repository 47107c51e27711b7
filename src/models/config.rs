use crate::error::ConfigError;
use crate::models::TargetSpec;
use flag_quantize::ProcessingParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "FLAGMAKER_CONFIG";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "flagmaker.yaml";

/// Application configuration loaded from flagmaker.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Image used when `generate` is run without arguments
    #[serde(default = "default_source_image")]
    pub source_image: PathBuf,

    /// Palette atlas every flag is addressed in
    #[serde(default = "default_palette_image")]
    pub palette_image: PathBuf,

    /// Directory generated flags are written to
    #[serde(default = "default_saved_flags_dir")]
    pub saved_flags_dir: PathBuf,

    /// File holding the currently active flag
    #[serde(default = "default_active_flag_file")]
    pub active_flag_file: PathBuf,

    #[serde(default)]
    pub target: TargetSpec,

    #[serde(default)]
    pub adjustments: Adjustments,
}

fn default_source_image() -> PathBuf {
    PathBuf::from("source.png")
}

fn default_palette_image() -> PathBuf {
    PathBuf::from("palette.png")
}

fn default_saved_flags_dir() -> PathBuf {
    PathBuf::from("FlagMaker_SavedFlags")
}

fn default_active_flag_file() -> PathBuf {
    PathBuf::from("FlagMaker_SavedFlags/active_flag.txt")
}

/// Slider values applied to the source image before matching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustments {
    /// Offset added to every channel, -1..=1
    #[serde(default)]
    pub brightness: f32,

    /// Factor around mid-grey, 1..=10
    #[serde(default = "default_contrast")]
    pub contrast: f32,

    /// Sharpen blend weight, 0..=2
    #[serde(default)]
    pub sharpen: f32,

    /// Median window side, odd, 1..=9
    #[serde(default = "default_noise")]
    pub noise: usize,
}

fn default_contrast() -> f32 {
    1.8
}

fn default_noise() -> usize {
    3
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: default_contrast(),
            sharpen: 0.0,
            noise: default_noise(),
        }
    }
}

impl Adjustments {
    pub const BRIGHTNESS_RANGE: (f32, f32) = (-1.0, 1.0);
    pub const CONTRAST_RANGE: (f32, f32) = (1.0, 10.0);
    pub const SHARPEN_RANGE: (f32, f32) = (0.0, 2.0);
    pub const NOISE_RANGE: (usize, usize) = (1, 9);

    /// Clamp every value into its slider range.
    ///
    /// Even noise values are bumped to the next odd one so the median
    /// window stays centred. Non-finite floats fall back to the default.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let brightness = clamp_finite(self.brightness, Self::BRIGHTNESS_RANGE, defaults.brightness);
        let contrast = clamp_finite(self.contrast, Self::CONTRAST_RANGE, defaults.contrast);
        let sharpen = clamp_finite(self.sharpen, Self::SHARPEN_RANGE, defaults.sharpen);

        let (lo, hi) = Self::NOISE_RANGE;
        let mut noise = self.noise.clamp(lo, hi);
        if noise % 2 == 0 {
            tracing::debug!(noise, bumped = noise + 1, "Even noise window, using next odd size");
            noise += 1;
        }

        let normalized = Self {
            brightness,
            contrast,
            sharpen,
            noise,
        };
        if normalized != self {
            tracing::debug!(original = ?self, ?normalized, "Adjusted out-of-range settings");
        }
        normalized
    }

    /// Filter parameters for the quantizer
    pub fn to_parameters(&self) -> ProcessingParameters {
        ProcessingParameters::new()
            .brightness(self.brightness)
            .contrast(self.contrast)
            .sharpen(self.sharpen)
            .median_size(self.noise)
    }
}

fn clamp_finite(value: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// No config file; built-in defaults
    Defaults,
    /// Parsed from this file
    File(PathBuf),
    /// The default file exists but could not be used; built-in defaults
    Fallback(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Fallback(path) => {
                write!(f, "defaults ({} unreadable)", path.display())
            }
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path (argument, then `FLAGMAKER_CONFIG`) must exist and
    /// parse. Otherwise `flagmaker.yaml` in the working directory is used
    /// when present, falling back to defaults if it cannot be read.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            None => Ok(Self::load_default_file(Path::new(DEFAULT_CONFIG_FILE))),
        }
    }

    /// Load `path` if it exists, defaults otherwise. Never fails.
    pub fn load_default_file(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return (Self::default(), ConfigSource::Defaults);
        }
        match Self::from_file(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                (Self::default(), ConfigSource::Fallback(path.to_path_buf()))
            }
        }
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            palette = %config.palette_image.display(),
            size = %config.target,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse YAML and normalize the result
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config.normalized())
    }

    /// Clamp adjustments and repair an unusable target size
    pub fn normalized(mut self) -> Self {
        self.adjustments = self.adjustments.normalized();
        if !self.target.is_valid() {
            tracing::warn!(size = %self.target, "Invalid target size, using default");
            self.target = TargetSpec::default();
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_image: default_source_image(),
            palette_image: default_palette_image(),
            saved_flags_dir: default_saved_flags_dir(),
            active_flag_file: default_active_flag_file(),
            target: TargetSpec::default(),
            adjustments: Adjustments::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.source_image, PathBuf::from("source.png"));
        assert_eq!(config.palette_image, PathBuf::from("palette.png"));
        assert_eq!(config.saved_flags_dir, PathBuf::from("FlagMaker_SavedFlags"));
        assert_eq!(
            config.active_flag_file,
            PathBuf::from("FlagMaker_SavedFlags/active_flag.txt")
        );
        assert_eq!(config.target, TargetSpec::FLAG);
    }

    #[test]
    fn test_default_adjustments() {
        let adjustments = Adjustments::default();
        assert_eq!(adjustments.brightness, 0.0);
        assert_eq!(adjustments.contrast, 1.8);
        assert_eq!(adjustments.sharpen, 0.0);
        assert_eq!(adjustments.noise, 3);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = AppConfig::from_yaml_str(include_str!("../../flagmaker.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
source_image: images/sunset.jpg
palette_image: atlas.png
saved_flags_dir: out
active_flag_file: out/current.txt
target:
  width: 50
  height: 33
adjustments:
  brightness: 0.1
  contrast: 2.5
  sharpen: 0.5
  noise: 5
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.source_image, PathBuf::from("images/sunset.jpg"));
        assert_eq!(config.palette_image, PathBuf::from("atlas.png"));
        assert_eq!(config.saved_flags_dir, PathBuf::from("out"));
        assert_eq!(config.active_flag_file, PathBuf::from("out/current.txt"));
        assert_eq!(config.target, TargetSpec { width: 50, height: 33 });
        assert_eq!(config.adjustments.brightness, 0.1);
        assert_eq!(config.adjustments.contrast, 2.5);
        assert_eq!(config.adjustments.sharpen, 0.5);
        assert_eq!(config.adjustments.noise, 5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
palette_image: custom.png
adjustments:
  sharpen: 1.0
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.palette_image, PathBuf::from("custom.png"));
        assert_eq!(config.source_image, PathBuf::from("source.png"));
        assert_eq!(config.adjustments.sharpen, 1.0);
        assert_eq!(config.adjustments.contrast, 1.8);
        assert_eq!(config.adjustments.noise, 3);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
        assert_eq!(
            AppConfig::from_yaml_str("\n  \n").unwrap(),
            AppConfig::default()
        );
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(AppConfig::from_yaml_str("target: [1, 2").is_err());
        assert!(AppConfig::from_yaml_str("adjustments:\n  noise: lots").is_err());
    }

    #[test]
    fn test_normalize_clamps_ranges() {
        let adjustments = Adjustments {
            brightness: -3.0,
            contrast: 0.2,
            sharpen: 9.0,
            noise: 40,
        }
        .normalized();

        assert_eq!(adjustments.brightness, -1.0);
        assert_eq!(adjustments.contrast, 1.0);
        assert_eq!(adjustments.sharpen, 2.0);
        assert_eq!(adjustments.noise, 9);
    }

    #[test]
    fn test_normalize_bumps_even_noise() {
        for (given, expected) in [(0, 1), (1, 1), (2, 3), (4, 5), (7, 7), (8, 9)] {
            let adjustments = Adjustments {
                noise: given,
                ..Default::default()
            }
            .normalized();
            assert_eq!(adjustments.noise, expected, "noise {given}");
        }
    }

    #[test]
    fn test_normalize_replaces_non_finite() {
        let adjustments = Adjustments {
            brightness: f32::NAN,
            contrast: f32::INFINITY,
            ..Default::default()
        }
        .normalized();
        assert_eq!(adjustments.brightness, 0.0);
        assert_eq!(adjustments.contrast, 1.8);
    }

    #[test]
    fn test_zero_target_falls_back() {
        let config = AppConfig::from_yaml_str("target: { width: 0, height: 10 }").unwrap();
        assert_eq!(config.target, TargetSpec::FLAG);
    }

    #[test]
    fn test_to_parameters() {
        let params = Adjustments {
            brightness: 0.2,
            contrast: 3.0,
            sharpen: 0.5,
            noise: 5,
        }
        .to_parameters();
        assert_eq!(params.brightness, 0.2);
        assert_eq!(params.contrast, 3.0);
        assert_eq!(params.sharpen, 0.5);
        assert_eq!(params.median_size, 5);
    }

    #[test]
    fn test_load_default_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = AppConfig::load_default_file(&dir.path().join("flagmaker.yaml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(source, ConfigSource::Defaults);
    }

    #[test]
    fn test_load_default_file_unparsable_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flagmaker.yaml");
        std::fs::write(&path, "adjustments: [oops").unwrap();

        let (config, source) = AppConfig::load_default_file(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(source, ConfigSource::Fallback(path));
    }

    #[test]
    fn test_explicit_file_errors_are_hard() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "target: {").unwrap();
        assert!(matches!(
            AppConfig::load(Some(&broken)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "adjustments: { noise: 6 }").unwrap();

        let (config, source) = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.adjustments.noise, 7);
        assert_eq!(source, ConfigSource::File(path));
    }
}
