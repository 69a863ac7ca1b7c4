// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attachment-point placement: align a point on the overlay to a point on the anchor.
//!
//! Both the anchor and the overlay expose a 3×3 grid of attachment points
//! ([`PositionPoint`]). Placement aligns the overlay's chosen point onto the
//! anchor's chosen point, resolving each axis independently:
//!
//! - the anchor-side coordinate is the box start, its midpoint, or its end;
//! - the overlay-side choice then shifts the overlay back by zero, half its
//!   length, or its whole length on that axis.
//!
//! There is no fallback search here — the caller's point pair is
//! authoritative. See [`crate::compass`] for the named-position vocabulary
//! with viewport-aware fallback.
//!
//! ## Minimal example
//!
//! ```
//! use awning_placement::point::{HAlign, PositionPoint, VAlign, resolve_point};
//! use kurbo::{Rect, Size};
//!
//! let anchor = Rect::new(100.0, 100.0, 200.0, 140.0);
//!
//! // Hang the overlay below the anchor, left edges flush.
//! let origin = resolve_point(
//!     anchor,
//!     Size::new(80.0, 60.0),
//!     PositionPoint::new(VAlign::Bottom, HAlign::Left),
//!     PositionPoint::new(VAlign::Top, HAlign::Left),
//! );
//! assert_eq!((origin.x, origin.y), (100.0, 140.0));
//! ```

use kurbo::{Point, Rect, Size};

/// Vertical attachment on a box: its top edge, vertical midpoint, or bottom edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VAlign {
    /// The top edge.
    #[default]
    Top,
    /// The vertical midpoint.
    Center,
    /// The bottom edge.
    Bottom,
}

/// Horizontal attachment on a box: its left edge, horizontal midpoint, or right edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HAlign {
    /// The left edge.
    #[default]
    Left,
    /// The horizontal midpoint.
    Center,
    /// The right edge.
    Right,
}

/// A point on a box's 3×3 attachment grid.
///
/// Used for the anchor side and the overlay side independently; each side's
/// nine choices combine into 81 legal placements.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PositionPoint {
    /// Vertical component.
    pub vertical: VAlign,
    /// Horizontal component.
    pub horizontal: HAlign,
}

impl PositionPoint {
    /// Create a point from its two axis components.
    #[must_use]
    pub const fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl VAlign {
    /// Fraction of the box length this alignment sits at along the axis.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

impl HAlign {
    /// Fraction of the box length this alignment sits at along the axis.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Resolve one axis: the anchor attachment coordinate minus the overlay's
/// own attachment offset.
fn axis(anchor_start: f64, anchor_len: f64, overlay_len: f64, anchor_f: f64, overlay_f: f64) -> f64 {
    anchor_start + anchor_len * anchor_f - overlay_len * overlay_f
}

/// Resolve the overlay's top-left origin so that `overlay_point` on the
/// overlay coincides with `anchor_point` on the anchor.
///
/// Pure and deterministic: identical rectangles always produce identical
/// origins. The vertical and horizontal axes are two independent
/// one-dimensional computations.
#[must_use]
pub fn resolve_point(
    anchor: Rect,
    overlay: Size,
    anchor_point: PositionPoint,
    overlay_point: PositionPoint,
) -> Point {
    Point::new(
        axis(
            anchor.x0,
            anchor.width(),
            overlay.width,
            anchor_point.horizontal.factor(),
            overlay_point.horizontal.factor(),
        ),
        axis(
            anchor.y0,
            anchor.height(),
            overlay.height,
            anchor_point.vertical.factor(),
            overlay_point.vertical.factor(),
        ),
    )
}
