// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment surface controllers measure against.

use awning_placement::Viewport;
use kurbo::{Rect, Size};

use crate::{ElementId, SurfaceId};

/// Geometry and lookup services the embedder provides.
///
/// All rectangles are in document coordinates (scroll offsets already
/// applied). Every query is fallible: an element can disappear, and a
/// freshly mounted surface has no measured size until the embedder lays it
/// out. Controllers treat `None` as transient — they stay unplaced and try
/// again rather than erroring.
pub trait Host {
    /// Locate the anchor element for an identifying token, if one exists.
    fn find_anchor(&self, token: &str) -> Option<ElementId>;

    /// Bounding rectangle of an element, in document coordinates.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    /// Measured size of a mounted overlay surface's content.
    fn surface_size(&self, surface: SurfaceId) -> Option<Size>;

    /// Current scroll offsets and window size.
    fn viewport(&self) -> Viewport;
}
