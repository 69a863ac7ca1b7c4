// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named compass placement with viewport-aware fallback.
//!
//! [`Compass`] names twelve placements around an anchor. The first word is
//! the side of the anchor the overlay sits on; the optional second word pins
//! one pair of edges flush instead of centering:
//!
//! - `Top` / `Bottom` / `Left` / `Right`: centered on the perpendicular axis.
//! - `TopLeft`, `TopRight`, `BottomLeft`, `BottomRight`: above/below, with the
//!   named vertical edge pair flush.
//! - `LeftTop`, `LeftBottom`, `RightTop`, `RightBottom`: beside, with the
//!   named horizontal edge pair flush.
//!
//! Each position is defined as a pair of attachment points (one on the
//! anchor, one on the overlay) in a closed twelve-row table
//! ([`Compass::attachment`]), and resolved through
//! [`resolve_point`](crate::point::resolve_point). The table is data, not
//! branching logic, so every position's semantics can be audited in one look.
//!
//! ## Fallback
//!
//! [`resolve_with_fallback`] walks the priority cycle starting at the
//! preferred position (wrapping around) and accepts the first candidate whose
//! resulting rectangle lies entirely inside the viewport. The previously
//! resolved position is appended as the final candidate: when several
//! positions are equally viable across consecutive re-measurements, staying
//! where we were beats strict priority and avoids placement flicker. When no
//! candidate fits, the last one is used as a best effort, never an error.
//!
//! ## Minimal example
//!
//! ```
//! use awning_placement::compass::{Compass, resolve_compass};
//! use kurbo::{Rect, Size};
//!
//! let anchor = Rect::new(100.0, 100.0, 200.0, 140.0);
//! let origin = resolve_compass(anchor, Size::new(60.0, 20.0), Compass::Top);
//! // Centered above the anchor.
//! assert_eq!((origin.x, origin.y), (120.0, 80.0));
//! ```

use kurbo::{Point, Rect, Size};

use crate::point::{HAlign, PositionPoint, VAlign, resolve_point};
use crate::viewport::Viewport;

/// A named placement of an overlay around its anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compass {
    /// Above, horizontally centered.
    #[default]
    Top,
    /// Below, horizontally centered.
    Bottom,
    /// To the left, vertically centered.
    Left,
    /// To the right, vertically centered.
    Right,
    /// Above, left edges flush.
    TopLeft,
    /// Above, right edges flush.
    TopRight,
    /// Below, left edges flush.
    BottomLeft,
    /// Below, right edges flush.
    BottomRight,
    /// To the left, top edges flush.
    LeftTop,
    /// To the left, bottom edges flush.
    LeftBottom,
    /// To the right, top edges flush.
    RightTop,
    /// To the right, bottom edges flush.
    RightBottom,
}

/// Whether the fallback search over alternate positions runs at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AutoPosition {
    /// Try alternates from the priority cycle when the preferred position clips.
    #[default]
    Enabled,
    /// Only the preferred position is ever tried.
    Disabled,
}

/// A resolved placement: where the overlay's top-left corner goes, and which
/// compass position produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Document-absolute top-left corner for the overlay.
    pub origin: Point,
    /// The compass position that was used.
    pub position: Compass,
}

/// The fixed candidate cycle for the fallback search.
///
/// Centered positions are preferred over edge-flush ones; the cycle then
/// walks the edge-flush variants clockwise from the top-left.
pub const PRIORITY: [Compass; 12] = [
    Compass::Top,
    Compass::Bottom,
    Compass::Left,
    Compass::Right,
    Compass::TopLeft,
    Compass::TopRight,
    Compass::RightTop,
    Compass::RightBottom,
    Compass::BottomRight,
    Compass::BottomLeft,
    Compass::LeftBottom,
    Compass::LeftTop,
];

impl Compass {
    /// The `(anchor, overlay)` attachment-point pair defining this position.
    ///
    /// This is the whole semantics of the compass vocabulary, one row per
    /// position.
    #[must_use]
    pub const fn attachment(self) -> (PositionPoint, PositionPoint) {
        use HAlign::{Center as HC, Left as L, Right as R};
        use VAlign::{Bottom as B, Center as VC, Top as T};
        let (anchor, overlay) = match self {
            Self::Top => ((T, HC), (B, HC)),
            Self::Bottom => ((B, HC), (T, HC)),
            Self::Left => ((VC, L), (VC, R)),
            Self::Right => ((VC, R), (VC, L)),
            Self::TopLeft => ((T, L), (B, L)),
            Self::TopRight => ((T, R), (B, R)),
            Self::BottomLeft => ((B, L), (T, L)),
            Self::BottomRight => ((B, R), (T, R)),
            Self::LeftTop => ((T, L), (T, R)),
            Self::LeftBottom => ((B, L), (B, R)),
            Self::RightTop => ((T, R), (T, L)),
            Self::RightBottom => ((B, R), (B, L)),
        };
        (
            PositionPoint::new(anchor.0, anchor.1),
            PositionPoint::new(overlay.0, overlay.1),
        )
    }

    /// Index of this position in the [`PRIORITY`] cycle.
    #[must_use]
    pub fn priority_index(self) -> usize {
        // PRIORITY contains every variant exactly once.
        PRIORITY.iter().position(|&p| p == self).unwrap_or(0)
    }

    /// The position's name as a class-name token (`"bottomRight"` style).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
            Self::LeftTop => "leftTop",
            Self::LeftBottom => "leftBottom",
            Self::RightTop => "rightTop",
            Self::RightBottom => "rightBottom",
        }
    }
}

/// Resolve a single compass position to the overlay's top-left origin.
///
/// Pure and deterministic; no fallback search.
#[must_use]
pub fn resolve_compass(anchor: Rect, overlay: Size, position: Compass) -> Point {
    let (anchor_point, overlay_point) = position.attachment();
    resolve_point(anchor, overlay, anchor_point, overlay_point)
}

/// Resolve a compass position with the viewport-aware fallback search.
///
/// Candidates are tried in [`PRIORITY`] order starting at `preferred`
/// (wrapping around), with `previous` (the position resolved on the last
/// successful run) appended as the final stability candidate. The first
/// candidate whose rectangle lies entirely inside `viewport` wins; when none
/// fits, the last candidate is used as a best effort. With
/// [`AutoPosition::Disabled`], only `preferred` is tried.
///
/// Calling this twice with identical inputs yields identical output.
#[must_use]
pub fn resolve_with_fallback(
    anchor: Rect,
    overlay: Size,
    viewport: &Viewport,
    preferred: Compass,
    previous: Compass,
    auto: AutoPosition,
) -> Placement {
    let start = preferred.priority_index();
    let candidates = match auto {
        AutoPosition::Disabled => 1,
        AutoPosition::Enabled => PRIORITY.len() + 1,
    };

    let mut placed = Placement {
        origin: resolve_compass(anchor, overlay, preferred),
        position: preferred,
    };
    for i in 0..candidates {
        let position = if matches!(auto, AutoPosition::Disabled) {
            preferred
        } else if i < PRIORITY.len() {
            PRIORITY[(start + i) % PRIORITY.len()]
        } else {
            previous
        };
        let origin = resolve_compass(anchor, overlay, position);
        placed = Placement { origin, position };
        if viewport.contains_rect(Rect::from_origin_size(origin, overlay)) {
            break;
        }
    }
    placed
}
