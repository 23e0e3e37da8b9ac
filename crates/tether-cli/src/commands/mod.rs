//! Subcommand implementations
//!
//! Each command renders into a `String` so output can be snapshot-tested,
//! and `execute` writes it to the given sink.

pub mod presets;
pub mod resolve;

use crate::cli::Commands;
use anyhow::Result;
use std::io::Write;
use tether_config::TetherConfig;

pub fn execute(command: Commands, config: &TetherConfig, out: &mut impl Write) -> Result<()> {
    let rendered = match command {
        Commands::Resolve(args) => resolve::execute(&args, config)?,
        Commands::Presets { format } => presets::execute(config, format)?,
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}
