//! The full pipeline: base placement, flip, then edge clamp.

use crate::clamp;
use crate::flip;
use crate::geometry::{Rect, Viewport};
use crate::placement::{base_position, panel_size};
use crate::request::{PlacementRequest, PositionResult};
use crate::source::RectSource;
use tracing::debug;

/// Resolve a position from already-measured rects.
///
/// Deterministic: identical inputs always give an identical result. Content
/// with no measured size resolves with zero dimensions and is marked
/// provisional.
pub fn resolve(
    anchor: &Rect,
    content: &Rect,
    viewport: &Viewport,
    request: &PlacementRequest,
) -> PositionResult {
    let panel = panel_size(anchor, content, request);

    let base = base_position(anchor, panel, viewport, request);
    let flipped = flip::apply(base, anchor, panel, viewport, request);
    let clamped = clamp::apply(flipped, anchor, panel, viewport, request);

    PositionResult {
        top: clamped.candidate.top,
        left: clamped.candidate.left,
        width: request.match_width.then_some(anchor.width),
        max_height: clamped.max_height,
        placement: clamped.candidate.placement,
        provisional: content.is_unmeasured(),
    }
}

/// Measure through `source` and resolve.
///
/// Returns `None` when the anchor cannot be measured; the caller should hide
/// the panel rather than paint it at a stale location. Non-finite content
/// measurements are treated as unmeasured.
pub fn resolve_from<S: RectSource + ?Sized>(
    source: &S,
    request: &PlacementRequest,
) -> Option<PositionResult> {
    let anchor = match source.anchor_rect().and_then(Rect::validated) {
        Ok(anchor) => anchor,
        Err(err) => {
            debug!(%err, "anchor unavailable, no position");
            return None;
        }
    };
    let content = source.content_rect().validated().unwrap_or(Rect::ZERO);
    let viewport = source.viewport();

    Some(resolve(&anchor, &content, &viewport, request))
}
