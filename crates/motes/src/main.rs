mod app;
mod cli;
mod hero;
mod logging;

use std::io::stdout;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use motes_config::{Config, ConfigSource};

use crate::app::App;
use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let (mut config, source) = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config)?;
    match &source {
        ConfigSource::File(path) => tracing::info!(path = %path.display(), "loaded config"),
        ConfigSource::Defaults => tracing::info!("no config file, using defaults"),
    }

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(color_eyre::Report::from)
        .and_then(|()| App::new(config).run(terminal));
    // Restore regardless of how the app exited.
    if let Err(err) = execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(error = %err, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}
