//! # Tether Core
//!
//! Geometry for anchored floating panels (dropdowns, selects, tooltips,
//! popovers, context menus, submenus). Given an anchor rect, the panel's
//! measured rect, the viewport, and a [`PlacementRequest`], compute where the
//! panel should be painted.
//!
//! The pipeline runs in three stages:
//!
//! ```text
//! RectSource -> placement (base) -> flip (at most once) -> clamp -> PositionResult
//! ```
//!
//! Everything here is pure and synchronous. Deciding *when* to re-run the
//! pipeline lives in `tether-overlay`.
//!
//! ```
//! use tether_core::{resolve, Placement, PlacementRequest, Rect, Viewport};
//!
//! let anchor = Rect::new(700.0, 100.0, 120.0, 30.0);
//! let content = Rect::new(0.0, 0.0, 200.0, 150.0);
//! let viewport = Viewport::new(800.0, 768.0);
//!
//! let result = resolve(&anchor, &content, &viewport, &PlacementRequest::default());
//! assert_eq!(result.placement, Placement::Top);
//! assert_eq!(result.top, 546.0);
//! ```

#![warn(clippy::all)]

pub mod clamp;
mod error;
pub mod flip;
mod geometry;
pub mod placement;
mod preset;
mod request;
mod resolve;
mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod proptest_strategies;


pub use error::{RectError, RectResult};
pub use geometry::{Rect, Size, Viewport};
pub use preset::Component;
pub use request::{
    Align, Placement, PlacementRequest, PositionResult, DEFAULT_EDGE_PADDING, DEFAULT_OFFSET,
};
pub use resolve::{resolve, resolve_from};
pub use source::{FixedRects, RectSource};
