//! Single-substitution flip to the opposite side.
//!
//! At most one flip is attempted per resolution. When the opposite side is no
//! better the flipped candidate is kept anyway; the height cap in
//! [`crate::clamp`] deals with what still overflows.

use crate::geometry::{Rect, Size, Viewport};
use crate::placement::{main_axis_start, main_scroll, Candidate};
use crate::request::{Placement, PlacementRequest};
use tracing::trace;

/// Whether `candidate` runs past the viewport on the side it is placed on.
pub fn overflows_main_axis(candidate: &Candidate, panel: Size, viewport: &Viewport) -> bool {
    match candidate.placement {
        Placement::Bottom => candidate.top + panel.height > viewport.height + viewport.scroll_y,
        Placement::Top => candidate.top < viewport.scroll_y,
        Placement::Right => candidate.left + panel.width > viewport.width + viewport.scroll_x,
        Placement::Left => candidate.left < viewport.scroll_x,
    }
}

/// Mirror `candidate` to the opposite side if it overflows and flipping is on.
pub fn apply(
    candidate: Candidate,
    anchor: &Rect,
    panel: Size,
    viewport: &Viewport,
    request: &PlacementRequest,
) -> Candidate {
    if !request.flip || !overflows_main_axis(&candidate, panel, viewport) {
        return candidate;
    }

    let opposite = candidate.placement.opposite();
    let main =
        main_axis_start(opposite, anchor, panel, request.offset) + main_scroll(opposite, viewport);

    trace!(
        from = %candidate.placement,
        to = %opposite,
        main,
        "flipping overlay to opposite side"
    );

    let mut flipped = Candidate {
        placement: opposite,
        ..candidate
    };
    flipped.set_main(main);
    flipped
}
