//! Placement requests and resolved results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default gap kept between a clamped panel and the viewport edge
pub const DEFAULT_EDGE_PADDING: f64 = 10.0;

/// Default gap between anchor and panel on the main axis
pub const DEFAULT_OFFSET: f64 = 4.0;

/// Side of the anchor the panel is placed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub const ALL: [Placement; 4] = [
        Placement::Top,
        Placement::Bottom,
        Placement::Left,
        Placement::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Placement::Top => Placement::Bottom,
            Placement::Bottom => Placement::Top,
            Placement::Left => Placement::Right,
            Placement::Right => Placement::Left,
        }
    }

    /// Top and bottom placements stack along the vertical axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Placement::Top | Placement::Bottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
            Placement::Right => "right",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Placement::Top),
            "bottom" => Ok(Placement::Bottom),
            "left" => Ok(Placement::Left),
            "right" => Ok(Placement::Right),
            other => Err(format!("unknown placement: {other}")),
        }
    }
}

/// Cross-axis alignment of the panel against the anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Align::Start),
            "center" => Ok(Align::Center),
            "end" => Ok(Align::End),
            other => Err(format!("unknown align: {other}")),
        }
    }
}

/// How a floating panel wants to be placed against its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRequest {
    /// Preferred side of the anchor
    pub placement: Placement,
    /// Cross-axis alignment
    pub align: Align,
    /// Gap between anchor and panel on the main axis
    pub offset: f64,
    /// Extra cross-axis shift applied after alignment
    pub align_offset: f64,
    /// Mirror to the opposite side once when the preferred side lacks room
    pub flip: bool,
    /// Keep the panel inside the viewport (cross-axis shift, vertical height cap)
    pub avoid_edges: bool,
    /// Force the panel width to the anchor width
    pub match_width: bool,
    /// Gap kept from the viewport edges when clamping
    pub edge_padding: f64,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            align: Align::Start,
            offset: DEFAULT_OFFSET,
            align_offset: 0.0,
            flip: true,
            avoid_edges: true,
            match_width: false,
            edge_padding: DEFAULT_EDGE_PADDING,
        }
    }
}

impl PlacementRequest {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            ..Default::default()
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Negative offsets are floored at zero.
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    pub fn align_offset(mut self, align_offset: f64) -> Self {
        self.align_offset = align_offset;
        self
    }

    pub fn flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn avoid_edges(mut self, avoid_edges: bool) -> Self {
        self.avoid_edges = avoid_edges;
        self
    }

    pub fn match_width(mut self, match_width: bool) -> Self {
        self.match_width = match_width;
        self
    }

    /// Negative padding is floored at zero.
    pub fn edge_padding(mut self, edge_padding: f64) -> Self {
        self.edge_padding = edge_padding.max(0.0);
        self
    }
}

/// Where the panel should be painted, in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub top: f64,
    pub left: f64,
    /// Present iff `match_width` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Present iff neither vertical side had room and the panel must scroll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    /// Side the panel ended up on after flipping
    pub placement: Placement,
    /// Content had no measured size yet; a refine pass will follow
    #[serde(default)]
    pub provisional: bool,
}
