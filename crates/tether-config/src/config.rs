//! Engine defaults and per-component preset overrides

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tether_core::{
    Align, Component, Placement, PlacementRequest, DEFAULT_EDGE_PADDING, DEFAULT_OFFSET,
};
use tracing::debug;

/// Settings shared by every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Gap kept from the viewport edges when clamping
    pub edge_padding: f64,
    /// Main-axis gap for requests built without a preset
    pub default_offset: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_padding: DEFAULT_EDGE_PADDING,
            default_offset: DEFAULT_OFFSET,
        }
    }
}

/// Partial request; unset fields keep the preset's value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_edges: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_width: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_padding: Option<f64>,
}

impl PlacementOverrides {
    pub fn apply(&self, mut request: PlacementRequest) -> PlacementRequest {
        if let Some(placement) = self.placement {
            request = request.placement(placement);
        }
        if let Some(align) = self.align {
            request = request.align(align);
        }
        if let Some(offset) = self.offset {
            request = request.offset(offset);
        }
        if let Some(align_offset) = self.align_offset {
            request = request.align_offset(align_offset);
        }
        if let Some(flip) = self.flip {
            request = request.flip(flip);
        }
        if let Some(avoid_edges) = self.avoid_edges {
            request = request.avoid_edges(avoid_edges);
        }
        if let Some(match_width) = self.match_width {
            request = request.match_width(match_width);
        }
        if let Some(edge_padding) = self.edge_padding {
            request = request.edge_padding(edge_padding);
        }
        request
    }

    fn validate(&self, prefix: &str) -> ConfigResult<()> {
        if let Some(offset) = self.offset {
            non_negative(&format!("{prefix}.offset"), offset)?;
        }
        if let Some(edge_padding) = self.edge_padding {
            non_negative(&format!("{prefix}.edge_padding"), edge_padding)?;
        }
        if let Some(align_offset) = self.align_offset {
            finite(&format!("{prefix}.align_offset"), align_offset)?;
        }
        Ok(())
    }
}

/// Overrides for each built-in component preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresetsConfig {
    pub dropdown: PlacementOverrides,
    pub select: PlacementOverrides,
    pub tooltip: PlacementOverrides,
    pub popover: PlacementOverrides,
    pub context_menu: PlacementOverrides,
    pub submenu: PlacementOverrides,
}

impl PresetsConfig {
    pub fn get(&self, component: Component) -> &PlacementOverrides {
        match component {
            Component::Dropdown => &self.dropdown,
            Component::Select => &self.select,
            Component::Tooltip => &self.tooltip,
            Component::Popover => &self.popover,
            Component::ContextMenu => &self.context_menu,
            Component::Submenu => &self.submenu,
        }
    }
}

/// Top-level tether configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TetherConfig {
    pub engine: EngineConfig,
    pub presets: PresetsConfig,
}

impl TetherConfig {
    /// Parse and validate a TOML document.
    pub fn parse(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading tether config");
        Self::parse(&contents)
    }

    /// Load `config_file`, else the default location, else built-in defaults.
    pub fn from_file_or_default(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_file
            .or_else(Self::default_config_path)
            .filter(|p| p.exists());

        match path {
            Some(path) => Self::load(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `~/.config/tether/config.toml` on Linux, the platform equivalent elsewhere.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tether").join("config.toml"))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("engine.edge_padding", self.engine.edge_padding)?;
        non_negative("engine.default_offset", self.engine.default_offset)?;
        for component in Component::ALL {
            self.presets
                .get(component)
                .validate(&format!("presets.{component}"))?;
        }
        Ok(())
    }

    /// Request for ad-hoc panels that use no preset.
    pub fn default_request(&self) -> PlacementRequest {
        PlacementRequest::default()
            .offset(self.engine.default_offset)
            .edge_padding(self.engine.edge_padding)
    }

    /// Effective request for `component`: built-in preset, engine padding,
    /// then the configured overrides.
    pub fn request_for(&self, component: Component) -> PlacementRequest {
        let base = component.request().edge_padding(self.engine.edge_padding);
        self.presets.get(component).apply(base)
    }

    /// Like [`Self::request_for`], looking the component up by name.
    pub fn request_named(&self, name: &str) -> ConfigResult<PlacementRequest> {
        let component: Component = name
            .parse()
            .map_err(|_| ConfigError::UnknownPreset(name.to_string()))?;
        Ok(self.request_for(component))
    }
}

fn finite(field: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        })
    }
}

fn non_negative(field: &str, value: f64) -> ConfigResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: format!("must not be negative (got {value})"),
        });
    }
    Ok(())
}
