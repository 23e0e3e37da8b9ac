//! Placement defaults for the floating-panel components

use crate::request::{Align, Placement, PlacementRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A floating-panel component with its own placement defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Dropdown,
    Select,
    Tooltip,
    Popover,
    /// Anchored to the pointer location via [`crate::Rect::point`]
    ContextMenu,
    /// Anchored to its own trigger item, not the parent panel
    Submenu,
}

impl Component {
    pub const ALL: [Component; 6] = [
        Component::Dropdown,
        Component::Select,
        Component::Tooltip,
        Component::Popover,
        Component::ContextMenu,
        Component::Submenu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::Dropdown => "dropdown",
            Component::Select => "select",
            Component::Tooltip => "tooltip",
            Component::Popover => "popover",
            Component::ContextMenu => "context_menu",
            Component::Submenu => "submenu",
        }
    }

    /// Built-in request for this component.
    pub fn request(self) -> PlacementRequest {
        let base = PlacementRequest::default();
        match self {
            Component::Dropdown => base,
            Component::Select => base.match_width(true),
            Component::Tooltip => base.align(Align::Center).offset(0.0),
            Component::Popover => base.align(Align::Center),
            Component::ContextMenu => base.offset(5.0),
            Component::Submenu => base.placement(Placement::Right),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.as_str().replace('_', "-") == s)
            .ok_or_else(|| format!("unknown component: {s}"))
    }
}
