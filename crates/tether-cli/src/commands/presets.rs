use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use tether_config::TetherConfig;
use tether_core::{Component, PlacementRequest};

#[derive(Serialize)]
struct PresetRow {
    component: Component,
    #[serde(flatten)]
    request: PlacementRequest,
}

/// List every component with its effective request.
pub fn execute(config: &TetherConfig, format: OutputFormat) -> Result<String> {
    let rows: Vec<PresetRow> = Component::ALL
        .into_iter()
        .map(|component| PresetRow {
            component,
            request: config.request_for(component),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&rows).context("Failed to serialize presets")
        }
        OutputFormat::Text => Ok(rows.iter().map(text_row).collect::<Vec<_>>().join("\n")),
    }
}

fn text_row(row: &PresetRow) -> String {
    let r = &row.request;
    format!(
        "{:<12} {:<6} {:<6} offset={} align_offset={} flip={} avoid_edges={} match_width={} edge_padding={}",
        row.component.as_str(),
        r.placement.as_str(),
        r.align.as_str(),
        r.offset,
        r.align_offset,
        r.flip,
        r.avoid_edges,
        r.match_width,
        r.edge_padding,
    )
}
