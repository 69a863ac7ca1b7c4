// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awning Placement: pure anchored-placement geometry for floating overlays.
//!
//! This crate answers one question: given the rectangle of an anchor element,
//! the measured size of a floating overlay, and a desired attachment, where
//! does the overlay's top-left corner go? Everything is a pure function over
//! [`kurbo`] values in document coordinates (scroll offsets already applied),
//! so results are deterministic and trivially testable.
//!
//! Two placement vocabularies are provided:
//!
//! - [`point`]: a 3×3 grid of attachment points on the anchor's box paired
//!   with a 3×3 grid on the overlay's own box. Each axis resolves
//!   independently, giving 81 legal combinations. The caller's choice is
//!   authoritative; there is no fallback search.
//! - [`compass`]: twelve named positions (`Top`, `BottomLeft`, `RightTop`,
//!   ...) with a priority-ordered fallback search that walks alternate
//!   positions until one fits entirely inside the [`Viewport`], keeping the
//!   previously resolved position as a final stability candidate.
//!
//! ## Minimal example
//!
//! ```
//! use awning_placement::compass::{AutoPosition, Compass, resolve_with_fallback};
//! use awning_placement::viewport::Viewport;
//! use kurbo::{Rect, Size, Vec2};
//!
//! // A 100×40 anchor near the top of an unscrolled 800×600 window.
//! let anchor = Rect::new(350.0, 10.0, 450.0, 50.0);
//! let viewport = Viewport::new(Vec2::ZERO, Size::new(800.0, 600.0));
//!
//! // `Top` would clip above the window, so the search falls through to the
//! // next viable candidate in the priority cycle.
//! let placed = resolve_with_fallback(
//!     anchor,
//!     Size::new(120.0, 30.0),
//!     &viewport,
//!     Compass::Top,
//!     Compass::Top,
//!     AutoPosition::Enabled,
//! );
//! assert_eq!(placed.position, Compass::Bottom);
//! assert_eq!(placed.origin.y, 50.0);
//! ```
//!
//! ## Coordinate conventions
//!
//! All rectangles are in document coordinates: the anchor rectangle is the
//! element's bounding box with the window's scroll offsets added, and the
//! [`Viewport`] pairs those scroll offsets with the window size. Resolved
//! origins are document-absolute and can be applied directly as `top`/`left`
//! of an absolutely positioned element.

#![no_std]

extern crate alloc;

pub mod compass;
pub mod point;
pub mod viewport;

pub use compass::{AutoPosition, Compass, Placement, resolve_compass, resolve_with_fallback};
pub use point::{HAlign, PositionPoint, VAlign, resolve_point};
pub use viewport::Viewport;
