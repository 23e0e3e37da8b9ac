//! Configuration for tether
//!
//! Loads `config.toml` with engine-wide defaults and per-component preset
//! overrides:
//!
//! ```toml
//! [engine]
//! edge_padding = 10
//! default_offset = 4
//!
//! [presets.tooltip]
//! placement = "top"
//! offset = 6
//! ```

mod config;
mod error;

pub use config::{EngineConfig, PlacementOverrides, PresetsConfig, TetherConfig};
pub use error::{ConfigError, ConfigResult};
