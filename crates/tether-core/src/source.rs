//! Where rects come from.
//!
//! A [`RectSource`] is implemented by each host adapter. Rects are queried on
//! every resolution and never cached between recompute cycles.

use crate::error::{RectError, RectResult};
use crate::geometry::{Rect, Viewport};
use std::cell::RefCell;
use std::rc::Rc;

/// Current measurements of an anchor, its floating content, and the window
pub trait RectSource {
    /// Bounding box of the trigger element, or [`RectError::Detached`] once it
    /// has left the tree.
    fn anchor_rect(&self) -> RectResult<Rect>;

    /// Bounding box of the floating panel. A zero rect before mount.
    fn content_rect(&self) -> Rect;

    /// Window size and scroll offsets.
    fn viewport(&self) -> Viewport;
}

impl<T: RectSource + ?Sized> RectSource for &T {
    fn anchor_rect(&self) -> RectResult<Rect> {
        (**self).anchor_rect()
    }

    fn content_rect(&self) -> Rect {
        (**self).content_rect()
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

impl<T: RectSource + ?Sized> RectSource for Rc<T> {
    fn anchor_rect(&self) -> RectResult<Rect> {
        (**self).anchor_rect()
    }

    fn content_rect(&self) -> Rect {
        (**self).content_rect()
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

impl<T: RectSource> RectSource for RefCell<T> {
    fn anchor_rect(&self) -> RectResult<Rect> {
        self.borrow().anchor_rect()
    }

    fn content_rect(&self) -> Rect {
        self.borrow().content_rect()
    }

    fn viewport(&self) -> Viewport {
        self.borrow().viewport()
    }
}

/// A snapshot of measurements, for hosts that measure up front
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRects {
    /// `None` models a detached anchor
    pub anchor: Option<Rect>,
    pub content: Rect,
    pub viewport: Viewport,
}

impl FixedRects {
    pub fn new(anchor: Rect, content: Rect, viewport: Viewport) -> Self {
        Self {
            anchor: Some(anchor),
            content,
            viewport,
        }
    }

    /// Simulate the anchor element leaving the tree.
    pub fn detach_anchor(&mut self) {
        self.anchor = None;
    }

    /// Scroll the document, moving the anchor's viewport position with it.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.viewport.scroll_x += dx;
        self.viewport.scroll_y += dy;
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.left -= dx;
            anchor.top -= dy;
        }
    }
}

impl RectSource for FixedRects {
    fn anchor_rect(&self) -> RectResult<Rect> {
        self.anchor.ok_or(RectError::Detached)
    }

    fn content_rect(&self) -> Rect {
        self.content
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
