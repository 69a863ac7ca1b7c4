// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip controller: compass placement with fallback, triggered by hover.
//!
//! A tooltip finds its anchor by an identifying token through the
//! [`Host`](crate::host::Host) — it does not hold an element reference. When
//! no element matches the token, binding is a no-op and a single warning is
//! logged; the controller stays inert (nothing renders) until a later bind
//! attempt finds one. The warning re-arms when the token changes.
//!
//! Placement uses the twelve compass positions with the viewport-aware
//! fallback search, remembering the previously resolved position as the
//! final stability candidate across re-measurements. Visibility is
//! self-managed by default (`mouseenter`/`mouseleave` with optional delays);
//! a controlled `open` value takes over when provided.
//!
//! While open, document-level listeners dismiss on outside press and — with
//! `hide_on_scroll`, the default — on any scroll (observed in the capture
//! phase, so scrolls inside nested containers count too) or resize. A press
//! on the anchor or on the tooltip's own surface suppresses the dismiss that
//! follows in the same gesture. Show paths defer placement through the
//! shared debounce window; the surface mounts immediately but stays
//! unplaced (and should be kept invisible) until placement runs.

use std::cell::RefCell;
use std::rc::Rc;

use awning_events::{Scope, Subscription};
use awning_placement::compass::{AutoPosition, Compass, resolve_with_fallback};
use awning_style::{ClassMap, StateClasses, class_list};
use awning_timing::Debounce;

use crate::host::Host;
use crate::layer::OverlayLayer;
use crate::trigger::{Transition, TriggerConfig, TriggerMachine, TriggerSet};
use crate::{ElementId, Hub, REPOSITION_DEBOUNCE_MS, SurfaceId, SurfaceStyle, Target, Update};

/// The logical base class of tooltip surfaces, resolved through the
/// embedder's [`ClassMap`].
pub const SURFACE_CLASS: &str = "overlay";

/// Tooltip configuration.
#[derive(Clone, Debug)]
pub struct TooltipConfig {
    /// Identifying token used to locate the anchor element.
    pub anchor: String,
    /// Preferred compass position.
    pub position: Compass,
    /// Controlled visibility. `None` (the default) leaves visibility to the
    /// triggers.
    pub open: Option<bool>,
    /// Show/hide trigger events and delays.
    pub triggers: TriggerConfig,
    /// Dismiss when the viewport scrolls or resizes.
    pub hide_on_scroll: bool,
    /// Disable the outside-press dismiss listeners.
    pub disable_global_events: bool,
    /// Whether the fallback search over alternate positions runs.
    pub auto_position: AutoPosition,
    /// Stack the surface above other floating content.
    pub on_top: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            anchor: String::new(),
            position: Compass::Top,
            open: None,
            triggers: TriggerConfig {
                show: TriggerSet::single("mouseenter"),
                hide: TriggerSet::single("mouseleave"),
                show_delay_ms: 0,
                hide_delay_ms: 0,
            },
            hide_on_scroll: true,
            disable_global_events: false,
            auto_position: AutoPosition::Enabled,
            on_top: false,
        }
    }
}

impl TooltipConfig {
    /// Default configuration for the given anchor token.
    #[must_use]
    pub fn for_anchor(token: &str) -> Self {
        Self {
            anchor: token.to_string(),
            ..Default::default()
        }
    }
}

struct TooltipCore {
    cfg: TooltipConfig,
    machine: TriggerMachine,
    debounce: Debounce,
    bound: Option<ElementId>,
    warned: bool,
    surface: Option<SurfaceId>,
    style: Option<SurfaceStyle>,
    resolved: Compass,
    updates: Update,
    hub: Hub,
    host: Rc<dyn Host>,
    layer: OverlayLayer,
    anchor_subs: Vec<Subscription<Target>>,
    global_subs: Vec<Subscription<Target>>,
}

/// A retained tooltip. See the module docs.
pub struct Tooltip {
    core: Rc<RefCell<TooltipCore>>,
}

impl core::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.core.borrow();
        f.debug_struct("Tooltip")
            .field("anchor", &inner.cfg.anchor)
            .field("open", &inner.machine.is_open())
            .field("resolved", &inner.resolved)
            .finish_non_exhaustive()
    }
}

impl Tooltip {
    /// Create a tooltip and bind its trigger events to the anchor matching
    /// the configured token. Starts open when the controlled `open` value
    /// says so; placement then runs immediately rather than debounced.
    pub fn new(hub: &Hub, host: Rc<dyn Host>, layer: &OverlayLayer, cfg: TooltipConfig) -> Self {
        let open = cfg.open.unwrap_or(false);
        let preferred = cfg.position;
        let core = Rc::new(RefCell::new(TooltipCore {
            cfg,
            machine: TriggerMachine::new(open),
            debounce: Debounce::new(REPOSITION_DEBOUNCE_MS),
            bound: None,
            warned: false,
            surface: None,
            style: None,
            resolved: preferred,
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
                restyle(inner);
            }
        }
        Self { core }
    }

    /// Replace the configuration.
    ///
    /// When the anchor token or the trigger event names changed, all
    /// listeners are unbound and rebound against the new configuration
    /// without dropping the current open state. A controlled `open` change
    /// is applied, and a re-measure is scheduled through the debounce.
    pub fn set_config(&self, cfg: TooltipConfig, now: u64) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;

        let anchor_changed = cfg.anchor != inner.cfg.anchor;
        // An unbound controller retries on every configuration pass; a valid
        // anchor appearing later is picked up then.
        let rebind = anchor_changed
            || cfg.triggers.event_names() != inner.cfg.triggers.event_names()
            || inner.bound.is_none();
        let open_request = cfg.open;
        if anchor_changed {
            // A fresh token is a fresh configuration; a missing anchor is
            // worth warning about again.
            inner.warned = false;
        }
        inner.cfg = cfg;

        if rebind {
            bind_anchor(&self.core, inner);
            if inner.machine.is_open() {
                // Remount against the new anchor, preserving open state.
                close_surface(inner);
                open_surface(&self.core, inner);
            }
        }
        if let Some(open) = open_request
            && let Some(transition) = inner.machine.set_open(open)
        {
            apply_transition(&self.core, inner, transition, now);
        }
        inner.debounce.poke(now);
    }

    /// Open unconditionally, bypassing trigger matching. Placement runs at
    /// the trailing edge of the debounce window.
    pub fn show(&self, now: u64) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        if let Some(transition) = inner.machine.show() {
            apply_transition(&self.core, inner, transition, now);
        }
    }

    /// Close unconditionally (suppressible once right after an owned
    /// interaction), bypassing trigger matching.
    pub fn hide(&self) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        if let Some(transition) = inner.machine.hide() {
            apply_transition(&self.core, inner, transition, 0);
        }
    }

    /// Advance timers: fire a due delayed intent and a due re-measure.
    pub fn pump(&self, now: u64) {
        let mut guard = self.core.borrow_mut();
        let inner = &mut *guard;
        if let Some(transition) = inner.machine.poll(&inner.cfg.triggers, now) {
            apply_transition(&self.core, inner, transition, now);
        }
        if inner.debounce.poll(now) && inner.machine.is_open() {
            restyle(inner);
        }
        // A measurement that was unavailable when the debounce fired may
        // have arrived since.
        if inner.machine.is_open() && inner.style.is_none() && !inner.debounce.is_armed() {
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

    /// Whether the tooltip is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.core.borrow().machine.is_open()
    }

    /// Whether an anchor element is currently bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.core.borrow().bound.is_some()
    }

    /// The mounted surface, while open with a bound anchor.
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceId> {
        self.core.borrow().surface
    }

    /// The current style; `None` while closed or unplaced.
    #[must_use]
    pub fn style(&self) -> Option<SurfaceStyle> {
        self.core.borrow().style
    }

    /// The compass position placement last resolved to. Starts at the
    /// preferred position.
    #[must_use]
    pub fn resolved_position(&self) -> Compass {
        self.core.borrow().resolved
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
        if inner.cfg.on_top {
            states |= StateClasses::ON_TOP;
        }
        states
    }

    /// The ordered concrete class list for the surface.
    #[must_use]
    pub fn classes(&self, map: &ClassMap) -> Vec<String> {
        let states = self.state_classes();
        let inner = self.core.borrow();
        class_list(map, SURFACE_CLASS, Some(inner.resolved.as_str()), states)
    }

    /// Drain pending change notifications.
    pub fn take_updates(&self) -> Update {
        let mut inner = self.core.borrow_mut();
        core::mem::take(&mut inner.updates)
    }
}

impl Drop for Tooltip {
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

fn bind_anchor(core: &Rc<RefCell<TooltipCore>>, inner: &mut TooltipCore) {
    inner.anchor_subs.clear();
    inner.bound = inner.host.find_anchor(&inner.cfg.anchor);
    let Some(element) = inner.bound else {
        if !inner.warned {
            inner.warned = true;
            log::warn!("no anchor element matches token {:?}", inner.cfg.anchor);
        }
        return;
    };
    let target = Target::Element(element);
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
                    apply_transition(&core, inner, transition, event.time_ms);
                }
            }));
    }
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

fn bind_globals(core: &Rc<RefCell<TooltipCore>>, inner: &mut TooltipCore) {
    inner.global_subs.clear();
    if !inner.cfg.disable_global_events {
        for name in ["mousedown", "touchstart"] {
            let weak = Rc::downgrade(core);
            inner
                .global_subs
                .push(inner.hub.subscribe(name, Scope::Bubble, move |event| {
                    let Some(core) = weak.upgrade() else { return };
                    let mut guard = core.borrow_mut();
                    let inner = &mut *guard;
                    if let Some(transition) = inner.machine.hide() {
                        apply_transition(&core, inner, transition, event.time_ms);
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
    if inner.cfg.hide_on_scroll {
        // Scroll does not bubble; observe it in the capture phase so scrolls
        // of nested containers are seen too.
        for (name, scope) in [("scroll", Scope::Capture), ("resize", Scope::Bubble)] {
            let weak = Rc::downgrade(core);
            inner
                .global_subs
                .push(inner.hub.subscribe(name, scope, move |event| {
                    let Some(core) = weak.upgrade() else { return };
                    let mut guard = core.borrow_mut();
                    let inner = &mut *guard;
                    if let Some(transition) = inner.machine.hide() {
                        apply_transition(&core, inner, transition, event.time_ms);
                    }
                }));
        }
    }
}

fn apply_transition(
    core: &Rc<RefCell<TooltipCore>>,
    inner: &mut TooltipCore,
    transition: Transition,
    now: u64,
) {
    match transition {
        Transition::Opened => {
            inner.updates |= Update::OPENED;
            open_surface(core, inner);
            inner.debounce.poke(now);
        }
        Transition::Closed => {
            inner.updates |= Update::CLOSED;
            close_surface(inner);
        }
    }
}

fn open_surface(core: &Rc<RefCell<TooltipCore>>, inner: &mut TooltipCore) {
    let Some(element) = inner.bound else {
        // Unbound: stay unmounted, render nothing.
        return;
    };
    if inner.surface.is_none() {
        inner.surface = Some(inner.layer.mount(Some(element)));
        inner.updates |= Update::MOUNTED;
    }
    bind_globals(core, inner);
}

fn close_surface(inner: &mut TooltipCore) {
    inner.global_subs.clear();
    inner.debounce.cancel();
    if let Some(surface) = inner.surface.take() {
        inner.layer.unmount(surface);
        inner.updates |= Update::UNMOUNTED;
    }
    // Force a fresh measurement on the next show.
    if inner.style.take().is_some() {
        inner.updates |= Update::STYLED;
    }
}

fn restyle(inner: &mut TooltipCore) {
    if !inner.machine.is_open() {
        return;
    }
    let (Some(element), Some(surface)) = (inner.bound, inner.surface) else {
        return;
    };
    let Some(anchor_rect) = inner.host.element_rect(element) else {
        return;
    };
    let Some(tip) = inner.host.surface_size(surface) else {
        return;
    };
    let viewport = inner.host.viewport();
    let placed = resolve_with_fallback(
        anchor_rect,
        tip,
        &viewport,
        inner.cfg.position,
        inner.resolved,
        inner.cfg.auto_position,
    );
    inner.resolved = placed.position;
    let style = SurfaceStyle {
        top: placed.origin.y,
        left: placed.origin.x,
        width: None,
        max_height: None,
    };
    if inner.style != Some(style) {
        inner.style = Some(style);
        inner.layer.set_style(surface, Some(style));
        inner.updates |= Update::STYLED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_hover_contract() {
        let cfg = TooltipConfig::default();
        assert_eq!(cfg.position, Compass::Top);
        assert!(cfg.triggers.show.contains("mouseenter"));
        assert!(cfg.triggers.hide.contains("mouseleave"));
        assert_eq!(cfg.triggers.show_delay_ms, 0);
        assert_eq!(cfg.triggers.hide_delay_ms, 0);
        assert!(cfg.hide_on_scroll);
        assert!(!cfg.disable_global_events);
        assert_eq!(cfg.auto_position, AutoPosition::Enabled);
        assert!(!cfg.on_top);
        assert_eq!(cfg.open, None);
    }

    #[test]
    fn for_anchor_sets_only_the_token() {
        let cfg = TooltipConfig::for_anchor("save-button");
        assert_eq!(cfg.anchor, "save-button");
        assert_eq!(cfg.position, Compass::Top);
    }
}
