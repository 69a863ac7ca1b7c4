// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport model: the visible window region in document coordinates.

use kurbo::{Point, Rect, Size, Vec2};

/// The visible window: scroll offsets plus the window's inner size.
///
/// The viewport lives in document coordinates, so the visible region starts
/// at the scroll offset rather than at the origin. Containment checks are
/// closed on all four edges — an overlay flush against a window edge still
/// counts as fitting.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Horizontal and vertical scroll offsets of the window.
    pub scroll: Vec2,
    /// Inner width and height of the window.
    pub size: Size,
}

impl Viewport {
    /// Create a viewport from scroll offsets and the window size.
    #[must_use]
    pub const fn new(scroll: Vec2, size: Size) -> Self {
        Self { scroll, size }
    }

    /// The visible region as a rectangle in document coordinates.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.scroll.x, self.scroll.y), self.size)
    }

    /// Whether `rect` lies entirely within the visible region.
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        let visible = self.visible_rect();
        rect.x0 >= visible.x0
            && rect.y0 >= visible.y0
            && rect.x1 <= visible.x1
            && rect.y1 <= visible.y1
    }
}
