//! Base placement: main-axis and cross-axis coordinates before flip or clamp.

use crate::geometry::{Rect, Size, Viewport};
use crate::request::{Align, Placement, PlacementRequest};

/// Position under consideration, in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub top: f64,
    pub left: f64,
    pub placement: Placement,
}

impl Candidate {
    /// Coordinate along the axis orthogonal to the placement.
    pub fn cross(&self) -> f64 {
        if self.placement.is_vertical() {
            self.left
        } else {
            self.top
        }
    }

    pub(crate) fn set_main(&mut self, value: f64) {
        if self.placement.is_vertical() {
            self.top = value;
        } else {
            self.left = value;
        }
    }

    pub(crate) fn set_cross(&mut self, value: f64) {
        if self.placement.is_vertical() {
            self.left = value;
        } else {
            self.top = value;
        }
    }
}

/// Size the panel will be painted at.
///
/// With `match_width` the painted width is the anchor's, whatever the content
/// measured; all later arithmetic uses this size.
pub fn panel_size(anchor: &Rect, content: &Rect, request: &PlacementRequest) -> Size {
    let width = if request.match_width {
        anchor.width
    } else {
        content.width
    };
    Size::new(width, content.height)
}

/// Scroll offset along the main axis of `placement`.
pub fn main_scroll(placement: Placement, viewport: &Viewport) -> f64 {
    if placement.is_vertical() {
        viewport.scroll_y
    } else {
        viewport.scroll_x
    }
}

/// Scroll offset along the cross axis of `placement`.
pub fn cross_scroll(placement: Placement, viewport: &Viewport) -> f64 {
    if placement.is_vertical() {
        viewport.scroll_x
    } else {
        viewport.scroll_y
    }
}

/// Main-axis start of the panel in viewport coordinates.
pub fn main_axis_start(placement: Placement, anchor: &Rect, panel: Size, offset: f64) -> f64 {
    match placement {
        Placement::Bottom => anchor.bottom() + offset,
        Placement::Top => anchor.top - panel.height - offset,
        Placement::Right => anchor.right() + offset,
        Placement::Left => anchor.left - panel.width - offset,
    }
}

/// Cross-axis start of the panel in viewport coordinates.
pub fn cross_axis_start(placement: Placement, align: Align, anchor: &Rect, panel: Size) -> f64 {
    let (lead, span, extent) = if placement.is_vertical() {
        (anchor.left, anchor.width, panel.width)
    } else {
        (anchor.top, anchor.height, panel.height)
    };

    match align {
        Align::Start => lead,
        Align::Center => lead + span / 2.0 - extent / 2.0,
        Align::End => lead + span - extent,
    }
}

/// Compute the unflipped, unclamped candidate for `request`.
pub fn base_position(
    anchor: &Rect,
    panel: Size,
    viewport: &Viewport,
    request: &PlacementRequest,
) -> Candidate {
    let placement = request.placement;
    let main = main_axis_start(placement, anchor, panel, request.offset)
        + main_scroll(placement, viewport);
    let cross = cross_axis_start(placement, request.align, anchor, panel)
        + request.align_offset
        + cross_scroll(placement, viewport);

    let mut candidate = Candidate {
        top: 0.0,
        left: 0.0,
        placement,
    };
    candidate.set_main(main);
    candidate.set_cross(cross);
    candidate
}
