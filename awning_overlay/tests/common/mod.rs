// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared in-memory host for the overlay integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use awning_events::Event;
use awning_overlay::{ElementId, Host, Hub, SurfaceId, Target};
use awning_placement::Viewport;
use kurbo::{Rect, Size, Vec2};

/// A scriptable [`Host`]: tests register elements and anchors, and adjust
/// measurements and the viewport mid-scenario.
pub(crate) struct FakeHost {
    state: RefCell<State>,
}

struct State {
    anchors: HashMap<String, ElementId>,
    rects: HashMap<ElementId, Rect>,
    surface_size: Option<Size>,
    viewport: Viewport,
}

#[allow(
    dead_code,
    reason = "Each test binary exercises its own subset of the helpers."
)]
impl FakeHost {
    /// A host with an unscrolled 800×600 viewport, no elements, and a
    /// default 100×80 measurement for every mounted surface.
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(State {
                anchors: HashMap::new(),
                rects: HashMap::new(),
                surface_size: Some(Size::new(100.0, 80.0)),
                viewport: Viewport::new(Vec2::ZERO, Size::new(800.0, 600.0)),
            }),
        })
    }

    /// Register an element with its document-coordinate rectangle.
    pub(crate) fn put_element(&self, id: ElementId, rect: Rect) {
        self.state.borrow_mut().rects.insert(id, rect);
    }

    /// Register an element and make it findable by an anchor token.
    pub(crate) fn put_anchor(&self, token: &str, id: ElementId, rect: Rect) {
        let mut state = self.state.borrow_mut();
        state.anchors.insert(token.to_string(), id);
        state.rects.insert(id, rect);
    }

    /// The measured size reported for every mounted surface; `None` makes
    /// surfaces unmeasurable.
    pub(crate) fn set_surface_size(&self, size: Option<Size>) {
        self.state.borrow_mut().surface_size = size;
    }

    /// Replace the viewport (scroll offsets and window size).
    pub(crate) fn set_viewport(&self, viewport: Viewport) {
        self.state.borrow_mut().viewport = viewport;
    }
}

impl Host for FakeHost {
    fn find_anchor(&self, token: &str) -> Option<ElementId> {
        self.state.borrow().anchors.get(token).copied()
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.state.borrow().rects.get(&element).copied()
    }

    fn surface_size(&self, _surface: SurfaceId) -> Option<Size> {
        self.state.borrow().surface_size
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }
}

/// Dispatch one event through the hub.
pub(crate) fn dispatch(hub: &Hub, name: &str, target: Option<Target>, time_ms: u64) {
    hub.dispatch(&Event {
        name,
        target,
        time_ms,
    });
}

/// A user click on an element: the press (which document-level dismiss
/// handlers also see) followed by the click itself.
#[allow(
    dead_code,
    reason = "Each test binary exercises its own subset of the helpers."
)]
pub(crate) fn click(hub: &Hub, element: ElementId, time_ms: u64) {
    dispatch(hub, "mousedown", Some(Target::Element(element)), time_ms);
    dispatch(hub, "click", Some(Target::Element(element)), time_ms);
}
