//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use motes_config::{Config, ConfigError};
use motes_core::Theme;

#[derive(Parser, Debug)]
#[command(
    name = "motes",
    version,
    about = "A terminal hero screen with a pointer-reactive particle field"
)]
pub struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, env = "MOTES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Initial theme (`dark` or `light`).
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Target frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Fixed seed for particle placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file. Filter with `MOTES_LOG` or `RUST_LOG`.
    #[arg(long, env = "MOTES_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()
    }
}
