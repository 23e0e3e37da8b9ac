//! Command-line front end for tether
//!
//! `tether resolve` runs the positioning pipeline on explicit geometry and
//! `tether presets` prints the effective per-component requests after the
//! config file is applied.

pub mod cli;
pub mod commands;
pub mod logging;
