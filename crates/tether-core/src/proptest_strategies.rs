//! Proptest strategies for placement property tests
//!
//! Provides reusable generators for anchors, content, viewports and requests.

use crate::geometry::{Rect, Viewport};
use crate::request::{Align, Placement, PlacementRequest};
use proptest::prelude::*;

/// Viewport sizes from phone to desktop, with optional scroll
pub fn arb_viewport() -> impl Strategy<Value = Viewport> {
    (
        320u32..=1920,
        320u32..=1200,
        prop_oneof![3 => Just(0u32), 1 => 0u32..2_000],
        prop_oneof![2 => Just(0u32), 2 => 0u32..5_000],
    )
        .prop_map(|(w, h, sx, sy)| {
            Viewport::new(f64::from(w), f64::from(h)).with_scroll(f64::from(sx), f64::from(sy))
        })
}

/// Anchor somewhere in (or slightly outside) a viewport of the given size
pub fn arb_anchor(viewport: Viewport) -> impl Strategy<Value = Rect> {
    let max_left = viewport.width as i32;
    let max_top = viewport.height as i32;
    (
        -40i32..max_left + 40,
        -40i32..max_top + 40,
        0u32..300,
        0u32..80,
    )
        .prop_map(|(left, top, w, h)| {
            Rect::new(f64::from(top), f64::from(left), f64::from(w), f64::from(h))
        })
}

/// Content size: unmeasured (edge case), small, or large
pub fn arb_content() -> impl Strategy<Value = Rect> {
    prop_oneof![
        1 => Just((0u32, 0u32)),
        6 => (1u32..400, 1u32..400),
        2 => (400u32..1200, 200u32..1200),
    ]
    .prop_map(|(w, h)| Rect::new(0.0, 0.0, f64::from(w), f64::from(h)))
}

pub fn arb_placement() -> impl Strategy<Value = Placement> {
    prop::sample::select(Placement::ALL.to_vec())
}

pub fn arb_align() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
}

/// Any request, with small offsets and paddings
pub fn arb_request() -> impl Strategy<Value = PlacementRequest> {
    (
        arb_placement(),
        arb_align(),
        0u32..24,
        -16i32..16,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0u32..24,
    )
        .prop_map(
            |(placement, align, offset, align_offset, flip, avoid_edges, match_width, padding)| {
                PlacementRequest::new(placement)
                    .align(align)
                    .offset(f64::from(offset))
                    .align_offset(f64::from(align_offset))
                    .flip(flip)
                    .avoid_edges(avoid_edges)
                    .match_width(match_width)
                    .edge_padding(f64::from(padding))
            },
        )
}

/// A full resolution input: anchor, content, viewport and request
pub fn arb_scenario() -> impl Strategy<Value = (Rect, Rect, Viewport, PlacementRequest)> {
    arb_viewport().prop_flat_map(|viewport| {
        (
            arb_anchor(viewport),
            arb_content(),
            Just(viewport),
            arb_request(),
        )
    })
}
