//! Rect and viewport value types.
//!
//! All rects are in viewport coordinates (what a bounding-box query returns).
//! Scroll offsets live on [`Viewport`] and are only added when a position is
//! converted to document space.

use crate::error::{RectError, RectResult};
use serde::{Deserialize, Serialize};

/// Width and height of a box
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        top: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// A zero-size rect at a pointer location, for panels opened at the cursor.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(y, x, 0.0, 0.0)
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when the box has no area yet, e.g. content that has not mounted.
    pub fn is_unmeasured(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }

    /// Reject rects carrying NaN or infinite fields.
    pub fn validated(self) -> RectResult<Self> {
        let fields = [
            ("top", self.top),
            ("left", self.left),
            ("width", self.width),
            ("height", self.height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(RectError::NonFinite { field });
            }
        }
        Ok(self)
    }
}

/// Window size and scroll offsets at measurement time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}
