// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup controller: attachment-point placement against a known anchor.
//!
//! A popup is handed its anchor element directly and positions its surface
//! with an explicit pair of attachment points, anchor side × overlay side,
//! with no fallback search (the caller's choice is authoritative). By default it
//! hangs below the anchor with left edges flush, syncs its width to the
//! anchor's, and caps its height at [`DEFAULT_MAX_HEIGHT`].
//!
//! Visibility is controlled through the `open` field by default; embedders
//! that want self-managed behavior configure trigger events instead. While
//! open, an outside press dismisses the popup (unless global events are
//! disabled) and viewport changes re-run placement through the shared
//! debounce window, or dismiss when `hide_on_scroll` is set.
//!
//! The controller is driven entirely by the embedder: events arrive through
//! the hub with their own timestamps, and [`Popup::pump`] advances timers.
//! Without an anchor the popup renders nothing, open or not.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;

use awning_events::{Scope, Subscription};
use awning_placement::point::{HAlign, PositionPoint, VAlign, resolve_point};
use awning_style::StateClasses;
use awning_timing::Debounce;

use crate::host::Host;
use crate::layer::OverlayLayer;
use crate::trigger::{Transition, TriggerConfig, TriggerMachine};
use crate::{
    ElementId, Hub, REPOSITION_DEBOUNCE_MS, SurfaceId, SurfaceStyle, Target, Update,
};

/// Height cap applied to popup surfaces when none is configured, in px.
pub const DEFAULT_MAX_HEIGHT: f64 = 500.0;

/// Popup configuration.
#[derive(Clone, Debug)]
pub struct PopupConfig {
    /// The anchor element, when one exists. `None` renders nothing.
    pub anchor: Option<ElementId>,
    /// Attachment point on the anchor's box.
    pub anchor_position: PositionPoint,
    /// Attachment point on the popup's own box.
    pub popup_position: PositionPoint,
    /// Controlled visibility. `None` leaves visibility to the triggers.
    pub open: Option<bool>,
    /// Self-managed trigger events; empty by default (fully controlled).
    pub triggers: TriggerConfig,
    /// Force the popup's width to the anchor's measured width.
    pub sync_width: bool,
    /// Height cap enforced via style, independent of positioning.
    pub max_height: f64,
    /// Dismiss on scroll/resize instead of repositioning.
    pub hide_on_scroll: bool,
    /// Disable the outside-press dismiss listeners.
    pub disable_global_events: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            anchor: None,
            anchor_position: PositionPoint::new(VAlign::Bottom, HAlign::Left),
            popup_position: PositionPoint::new(VAlign::Top, HAlign::Left),
            open: Some(false),
            triggers: TriggerConfig::default(),
            sync_width: true,
            max_height: DEFAULT_MAX_HEIGHT,
            hide_on_scroll: false,
            disable_global_events: false,
        }
    }
}

struct PopupCore {
    cfg: PopupConfig,
    machine: TriggerMachine,
    debounce: Debounce,
    surface: Option<SurfaceId>,
    style: Option<SurfaceStyle>,
    updates: Update,
    hub: Hub,
    host: Rc<dyn Host>,
    layer: OverlayLayer,
    anchor_subs: Vec<Subscription<Target>>,
    global_subs: Vec<Subscription<Target>>,
}

/// A retained popup. See the module docs.
pub struct Popup {
    core: Rc<RefCell<PopupCore>>,
}

impl core::fmt::Debug for Popup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.core.borrow();
        f.debug_struct("Popup")
            .field("open", &inner.machine.is_open())
            .field("surface", &inner.surface)
            .finish_non_exhaustive()
    }
}

impl Popup {
    /// Create a popup, bind its trigger events (if any), and, when it
    /// starts open with a usable anchor, mount and place its surface.
    pub fn new(hub: &Hub, host: Rc<dyn Host>, layer: &OverlayLayer, cfg: PopupConfig) -> Self {
        let open = cfg.open.unwrap_or(false);
        let core = Rc::new(RefCell::new(PopupCore {
            cfg,
            machine: TriggerMachine::new(open),
            debounce: Debounce::new(REPOSITION_DEBOUNCE_MS),
            surface: None,
            style: None,
            updates: Update::empty(),
            hub: hub.clone(),
            host,
            layer: layer.clone(),
            anchor_subs: Vec::new(),
            global_subs: Vec::new(),
        }));
        {
            let mut guard = core.borrow_mut();
            let inner = &mut *guard;
            bind_anchor(&core, inner);
            if inner.machine.is_open() {
                open_surface(&core, inner);
            }
        }
        Self { core }
    }

    /// Replace the configuration: rebinds when the anchor or trigger names
    /// changed (without dropping open state), applies a controlled `open`
    /// change, and schedules a re-measure.
    pub fn set_config(&self, cfg: PopupConfig, now: u64) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;

        let rebind = cfg.anchor != inner.cfg.anchor
            || cfg.triggers.event_names() != inner.cfg.triggers.event_names();
        let anchor_changed = cfg.anchor != inner.cfg.anchor;
        let open_request = cfg.open;
        inner.cfg = cfg;

        if rebind {
            bind_anchor(&self.core, inner);
        }
        if anchor_changed && inner.machine.is_open() {
            // The surface's logical owner changed; remount against it.
            close_surface(inner);
            open_surface(&self.core, inner);
        }
        if let Some(open) = open_request
            && let Some(transition) = inner.machine.set_open(open)
        {
            apply_transition(&self.core, inner, transition);
        }
        inner.debounce.poke(now);
    }

    /// Open unconditionally, bypassing trigger matching.
    pub fn show(&self) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        if let Some(transition) = inner.machine.show() {
            apply_transition(&self.core, inner, transition);
        }
    }

    /// Close unconditionally (suppressible once right after an owned
    /// interaction), bypassing trigger matching.
    pub fn hide(&self) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        if let Some(transition) = inner.machine.hide() {
            apply_transition(&self.core, inner, transition);
        }
    }

    /// Advance timers: fire a due delayed intent and a due re-measure.
    pub fn pump(&self, now: u64) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        if let Some(transition) = inner.machine.poll(&inner.cfg.triggers, now) {
            apply_transition(&self.core, inner, transition);
        }
        if inner.debounce.poll(now) {
            restyle(inner);
        }
        // A surface that was not measurable earlier may be by now.
        if inner.machine.is_open() && inner.style.is_none() {
            restyle(inner);
        }
    }

    /// When the embedder should call [`pump`](Self::pump) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        let inner = self.core.borrow();
        match (inner.machine.next_deadline(), inner.debounce.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether the popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.core.borrow().machine.is_open()
    }

    /// The mounted surface, while open with a usable anchor.
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceId> {
        self.core.borrow().surface
    }

    /// The current style; `None` while closed or unplaced.
    #[must_use]
    pub fn style(&self) -> Option<SurfaceStyle> {
        self.core.borrow().style
    }

    /// State classes for the surface.
    #[must_use]
    pub fn state_classes(&self) -> StateClasses {
        let inner = self.core.borrow();
        let mut states = StateClasses::empty();
        if inner.machine.is_open() {
            states |= StateClasses::OPEN;
        }
        if inner.style.is_none() {
            states |= StateClasses::UNPLACED;
        }
        states
    }

    /// Drain pending change notifications.
    pub fn take_updates(&self) -> Update {
        let mut inner = self.core.borrow_mut();
        core::mem::take(&mut inner.updates)
    }
}

impl Drop for Popup {
    fn drop(&mut self) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        inner.machine.cancel_pending();
        inner.debounce.cancel();
        inner.global_subs.clear();
        inner.anchor_subs.clear();
        if let Some(surface) = inner.surface.take() {
            inner.layer.unmount(surface);
        }
    }
}

fn bind_anchor(core: &Rc<RefCell<PopupCore>>, inner: &mut PopupCore) {
    inner.anchor_subs.clear();
    let Some(anchor) = inner.cfg.anchor else {
        return;
    };
    let target = Target::Element(anchor);
    for name in inner.cfg.triggers.event_names().iter() {
        let weak = Rc::downgrade(core);
        inner
            .anchor_subs
            .push(inner.hub.subscribe(name, Scope::Target(target), move |event| {
                let Some(core) = weak.upgrade() else { return };
                let mut guard = core.borrow_mut();
                let inner = &mut *guard;
                if let Some(transition) =
                    inner.machine.on_trigger(&inner.cfg.triggers, event.name, event.time_ms)
                {
                    apply_transition(&core, inner, transition);
                }
            }));
    }
    // A press on the anchor belongs to this popup; the document-level
    // dismiss that follows must not fire.
    let weak = Rc::downgrade(core);
    inner
        .anchor_subs
        .push(inner.hub.subscribe("mousedown", Scope::Target(target), move |_| {
            let Some(core) = weak.upgrade() else { return };
            let mut inner = core.borrow_mut();
            if !inner.cfg.disable_global_events {
                inner.machine.note_owned_interaction();
            }
        }));
}

fn bind_globals(core: &Rc<RefCell<PopupCore>>, inner: &mut PopupCore) {
    inner.global_subs.clear();
    if !inner.cfg.disable_global_events {
        for name in ["mousedown", "touchstart"] {
            let weak = Rc::downgrade(core);
            inner
                .global_subs
                .push(inner.hub.subscribe(name, Scope::Bubble, move |_| {
                    let Some(core) = weak.upgrade() else { return };
                    let mut guard = core.borrow_mut();
                    let inner = &mut *guard;
                    if let Some(transition) = inner.machine.hide() {
                        apply_transition(&core, inner, transition);
                    }
                }));
        }
        if let Some(surface) = inner.surface {
            let weak = Rc::downgrade(core);
            inner.global_subs.push(inner.hub.subscribe(
                "mousedown",
                Scope::Target(Target::Surface(surface)),
                move |_| {
                    let Some(core) = weak.upgrade() else { return };
                    let mut inner = core.borrow_mut();
                    if !inner.cfg.disable_global_events {
                        inner.machine.note_owned_interaction();
                    }
                },
            ));
        }
    }
    for (name, scope) in [("scroll", Scope::Capture), ("resize", Scope::Bubble)] {
        let weak = Rc::downgrade(core);
        inner
            .global_subs
            .push(inner.hub.subscribe(name, scope, move |event| {
                let Some(core) = weak.upgrade() else { return };
                let mut guard = core.borrow_mut();
                let inner = &mut *guard;
                if inner.cfg.hide_on_scroll {
                    if let Some(transition) = inner.machine.hide() {
                        apply_transition(&core, inner, transition);
                    }
                } else {
                    inner.debounce.poke(event.time_ms);
                }
            }));
    }
}

fn apply_transition(core: &Rc<RefCell<PopupCore>>, inner: &mut PopupCore, transition: Transition) {
    match transition {
        Transition::Opened => {
            inner.updates |= Update::OPENED;
            open_surface(core, inner);
        }
        Transition::Closed => {
            inner.updates |= Update::CLOSED;
            close_surface(inner);
        }
    }
}

fn open_surface(core: &Rc<RefCell<PopupCore>>, inner: &mut PopupCore) {
    let Some(anchor) = inner.cfg.anchor else {
        // No anchor: stay unmounted, render nothing.
        return;
    };
    if inner.surface.is_none() {
        inner.surface = Some(inner.layer.mount(Some(anchor)));
        inner.updates |= Update::MOUNTED;
    }
    restyle(inner);
    bind_globals(core, inner);
}

fn close_surface(inner: &mut PopupCore) {
    inner.global_subs.clear();
    inner.debounce.cancel();
    if let Some(surface) = inner.surface.take() {
        inner.layer.unmount(surface);
        inner.updates |= Update::UNMOUNTED;
    }
    if inner.style.take().is_some() {
        inner.updates |= Update::STYLED;
    }
}

fn restyle(inner: &mut PopupCore) {
    if !inner.machine.is_open() {
        return;
    }
    let (Some(anchor), Some(surface)) = (inner.cfg.anchor, inner.surface) else {
        return;
    };
    let Some(anchor_rect) = inner.host.element_rect(anchor) else {
        return;
    };
    let Some(measured) = inner.host.surface_size(surface) else {
        return;
    };
    let size = if inner.cfg.sync_width {
        Size::new(anchor_rect.width(), measured.height)
    } else {
        measured
    };
    let origin = resolve_point(
        anchor_rect,
        size,
        inner.cfg.anchor_position,
        inner.cfg.popup_position,
    );
    let style = SurfaceStyle {
        top: origin.y,
        left: origin.x,
        width: inner.cfg.sync_width.then(|| anchor_rect.width()),
        max_height: Some(inner.cfg.max_height),
    };
    if inner.style != Some(style) {
        inner.style = Some(style);
        inner.layer.set_style(surface, Some(style));
        inner.updates |= Update::STYLED;
    }
}
