use crate::cli::{OutputFormat, ResolveArgs};
use anyhow::{Context, Result};
use tether_config::TetherConfig;
use tether_core::{resolve, PlacementRequest, PositionResult, Rect, Viewport};
use tracing::debug;

/// Resolve one position from the command-line geometry.
pub fn execute(args: &ResolveArgs, config: &TetherConfig) -> Result<String> {
    let request = effective_request(args, config);
    let anchor = args.anchor_rect();
    let content = Rect::new(0.0, 0.0, args.content.width, args.content.height);
    let (scroll_x, scroll_y) = args.scroll.unwrap_or((0.0, 0.0));
    let viewport =
        Viewport::new(args.viewport.width, args.viewport.height).with_scroll(scroll_x, scroll_y);

    debug!(?anchor, ?content, ?viewport, ?request, "resolving");
    let result = resolve(&anchor, &content, &viewport, &request);
    render(&result, args.format)
}

/// Preset (or engine defaults) with command-line flags layered on top.
pub fn effective_request(args: &ResolveArgs, config: &TetherConfig) -> PlacementRequest {
    let base = match args.preset {
        Some(component) => config.request_for(component),
        None => config.default_request(),
    };
    args.overrides().apply(base)
}

pub fn render(result: &PositionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize position")
        }
        OutputFormat::Text => Ok(summary(result)),
    }
}

fn summary(result: &PositionResult) -> String {
    let mut line = format!(
        "placement={} top={} left={}",
        result.placement, result.top, result.left
    );
    if let Some(width) = result.width {
        line.push_str(&format!(" width={width}"));
    }
    if let Some(max_height) = result.max_height {
        line.push_str(&format!(" max_height={max_height}"));
    }
    if result.provisional {
        line.push_str(" provisional");
    }
    line
}
