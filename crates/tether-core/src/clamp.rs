//! Keep the panel on screen once a side has been chosen.
//!
//! The cross axis is shifted into `[scroll + padding, scroll + size - extent - padding]`.
//! The main axis is never relocated here; when a vertical placement overflows
//! and the opposite side has no room either, a `max_height` is reported
//! instead. Horizontal placements accept overflow.

use crate::flip::overflows_main_axis;
use crate::geometry::{Rect, Size, Viewport};
use crate::placement::{cross_scroll, Candidate};
use crate::request::{Placement, PlacementRequest};
use tracing::trace;

/// Candidate after clamping, plus the height cap when one was needed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    pub candidate: Candidate,
    pub max_height: Option<f64>,
}

/// Clamp `value` so a span of `extent` stays `padding` away from both edges.
///
/// When the span is wider than the room between the paddings, the leading
/// bound wins.
pub fn clamp_axis(value: f64, scroll: f64, size: f64, extent: f64, padding: f64) -> f64 {
    let min = scroll + padding;
    let max = scroll + size - extent - padding;
    value.min(max).max(min)
}

pub fn apply(
    candidate: Candidate,
    anchor: &Rect,
    panel: Size,
    viewport: &Viewport,
    request: &PlacementRequest,
) -> Clamped {
    if !request.avoid_edges {
        return Clamped {
            candidate,
            max_height: None,
        };
    }

    let padding = request.edge_padding;
    let mut clamped = candidate;

    let (size, extent) = if candidate.placement.is_vertical() {
        (viewport.width, panel.width)
    } else {
        (viewport.height, panel.height)
    };
    let cross = clamp_axis(
        candidate.cross(),
        cross_scroll(candidate.placement, viewport),
        size,
        extent,
        padding,
    );
    if cross != candidate.cross() {
        trace!(from = candidate.cross(), to = cross, "shifted overlay off the edge");
        clamped.set_cross(cross);
    }

    let max_height = if candidate.placement.is_vertical() {
        cap_height(&mut clamped, anchor, panel, viewport, request)
    } else {
        None
    };

    Clamped {
        candidate: clamped,
        max_height,
    }
}

/// Room left between the panel's start and the far edge on its chosen side.
fn available_height(
    candidate: &Candidate,
    anchor: &Rect,
    viewport: &Viewport,
    request: &PlacementRequest,
) -> f64 {
    let padding = request.edge_padding;
    match candidate.placement {
        Placement::Bottom => viewport.height + viewport.scroll_y - candidate.top - padding,
        Placement::Top => anchor.top - request.offset - padding,
        Placement::Left | Placement::Right => f64::INFINITY,
    }
}

/// Unpadded viewport space between the anchor and the edge on `placement`'s side.
pub fn room_on_side(placement: Placement, anchor: &Rect, viewport: &Viewport) -> f64 {
    match placement {
        Placement::Bottom => viewport.height - anchor.bottom(),
        Placement::Top => anchor.top,
        Placement::Right => viewport.width - anchor.right(),
        Placement::Left => anchor.left,
    }
}

fn cap_height(
    candidate: &mut Candidate,
    anchor: &Rect,
    panel: Size,
    viewport: &Viewport,
    request: &PlacementRequest,
) -> Option<f64> {
    if !overflows_main_axis(candidate, panel, viewport) {
        return None;
    }
    let opposite = candidate.placement.opposite();
    if room_on_side(opposite, anchor, viewport) >= panel.height + request.offset {
        return None;
    }

    let max_height = available_height(candidate, anchor, viewport, request).max(0.0);
    if candidate.placement == Placement::Top {
        candidate.top = anchor.top + viewport.scroll_y - request.offset - max_height;
    }

    trace!(
        placement = %candidate.placement,
        max_height,
        "no room on either side; capping overlay height"
    );
    Some(max_height)
}
