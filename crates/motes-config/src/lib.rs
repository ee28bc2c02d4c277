//! Configuration for the motes hero screen.
//!
//! Settings are read from a TOML file, by default
//! `<config dir>/motes/config.toml`. Every key is optional; anything left out
//! keeps its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use motes_core::{CellMetrics, FieldTuning, Theme};
use serde::{Deserialize, Serialize};

/// Name of the config file inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 240;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A link shown under the headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Text of the headline block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroContent {
    /// Typed out one character at a time.
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub links: Vec<Link>,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            title: "Fullstack Developer".to_string(),
            tagline: "Building scalable, secure, and user-focused applications".to_string(),
            links: Vec::new(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Initial color theme.
    pub theme: Theme,
    /// Target frames per second.
    pub fps: u32,
    /// Fixed seed for particle placement; random when unset.
    pub seed: Option<u64>,
    pub hero: HeroContent,
    pub field: FieldTuning,
    pub cell: CellMetrics,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            fps: 60,
            seed: None,
            hero: HeroContent::default(),
            field: FieldTuning::default(),
            cell: CellMetrics::default(),
        }
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl Config {
    /// Default location of the config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "motes").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = path {
            let config = Self::read(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                let config = Self::read(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            _ => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "read config file");
        Self::from_toml(&text)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::Invalid(format!(
                "fps must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.field.count == 0 {
            return Err(ConfigError::Invalid("field.count must be at least 1".into()));
        }
        let positive = [
            ("field.dot_radius", self.field.dot_radius),
            ("field.attraction_radius", self.field.attraction_radius),
            ("field.max_move", self.field.max_move),
            ("field.move_strength", self.field.move_strength),
            ("field.default_width", self.field.default_width),
            ("field.default_height", self.field.default_height),
            ("cell.width", self.cell.width),
            ("cell.height", self.cell.height),
        ];
        for (key, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }
        // The widest terminal must still map to a finite canvas.
        for (key, value) in [("cell.width", self.cell.width), ("cell.height", self.cell.height)] {
            if !(value * f32::from(u16::MAX)).is_finite() {
                return Err(ConfigError::Invalid(format!("{key} is too large, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.field.move_strength)
            || !(0.0..=1.0).contains(&self.field.relax_factor)
        {
            return Err(ConfigError::Invalid(
                "field.move_strength and field.relax_factor must be within 0..=1".into(),
            ));
        }
        Ok(())
    }
}
