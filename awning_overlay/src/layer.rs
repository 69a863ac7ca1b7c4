// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay layer: a portal for floating surfaces.
//!
//! Floating content cannot live inside its logical parent — ancestor
//! `overflow` clipping and stacking contexts would swallow it. The layer is
//! the detached mount point: controllers [`mount`](OverlayLayer::mount)
//! surfaces here, the embedder renders whatever the layer contains at the
//! end of the visible tree, and the logical owner recorded per surface is
//! what preserves event relationships (a press on a surface still counts as
//! an interaction with its owning anchor, not as an outside click).
//!
//! Presence in the layer is the definition of "rendered": a closed overlay
//! is unmounted, not hidden. Tests assert against
//! [`contains`](OverlayLayer::contains) and
//! [`surface_count`](OverlayLayer::surface_count) for exactly that reason.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::{ElementId, SurfaceId, SurfaceStyle};

#[derive(Debug)]
struct SurfaceEntry {
    owner: Option<ElementId>,
    style: Option<SurfaceStyle>,
}

#[derive(Debug, Default)]
struct LayerInner {
    surfaces: HashMap<SurfaceId, SurfaceEntry>,
    order: Vec<SurfaceId>,
    next_id: u64,
}

/// Shared registry of mounted floating surfaces. Cheap to clone; clones
/// share one registry.
#[derive(Clone, Default)]
pub struct OverlayLayer {
    inner: Rc<RefCell<LayerInner>>,
}

impl fmt::Debug for OverlayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayLayer")
            .field("surfaces", &self.surface_count())
            .finish()
    }
}

impl OverlayLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a new, unplaced surface owned by `owner`.
    pub fn mount(&self, owner: Option<ElementId>) -> SurfaceId {
        let mut inner = self.inner.borrow_mut();
        let id = SurfaceId(inner.next_id);
        inner.next_id += 1;
        inner.surfaces.insert(id, SurfaceEntry { owner, style: None });
        inner.order.push(id);
        id
    }

    /// Remove a surface. Returns whether it was mounted.
    pub fn unmount(&self, id: SurfaceId) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.order.retain(|&s| s != id);
        inner.surfaces.remove(&id).is_some()
    }

    /// Update (or clear) a mounted surface's style. A no-op for unknown ids.
    pub fn set_style(&self, id: SurfaceId, style: Option<SurfaceStyle>) {
        if let Some(entry) = self.inner.borrow_mut().surfaces.get_mut(&id) {
            entry.style = style;
        }
    }

    /// Whether `id` is currently mounted.
    #[must_use]
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.inner.borrow().surfaces.contains_key(&id)
    }

    /// The style of a mounted surface; `None` while unplaced or unmounted.
    #[must_use]
    pub fn style_of(&self, id: SurfaceId) -> Option<SurfaceStyle> {
        self.inner.borrow().surfaces.get(&id).and_then(|e| e.style)
    }

    /// The logical owner recorded at mount time.
    #[must_use]
    pub fn owner_of(&self, id: SurfaceId) -> Option<ElementId> {
        self.inner.borrow().surfaces.get(&id).and_then(|e| e.owner)
    }

    /// Number of mounted surfaces.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.inner.borrow().surfaces.len()
    }

    /// Mounted surfaces in mount order.
    #[must_use]
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.inner.borrow().order.clone()
    }
}
