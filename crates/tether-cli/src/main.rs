use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use tether_cli::{cli::Cli, commands, logging};
use tether_config::TetherConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_filter());

    let config = TetherConfig::from_file_or_default(cli.config.clone())
        .context("Failed to load tether config")?;
    debug!(edge_padding = config.engine.edge_padding, "config loaded");

    let mut stdout = std::io::stdout().lock();
    commands::execute(cli.command, &config, &mut stdout)
}
