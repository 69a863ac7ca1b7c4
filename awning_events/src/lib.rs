// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awning Events: a shared event hub with capture → target → bubble dispatch.
//!
//! Overlay components need two kinds of listeners: ones bound to a specific
//! element (trigger events on an anchor) and cross-cutting document-level
//! ones (outside-dismiss, scroll, resize). [`EventHub`] is the single shared
//! dispatcher both register with, keyed by event name, with guaranteed
//! unregister-on-teardown: dropping a [`Subscription`] removes it.
//!
//! Dispatch for one event walks three groups in order, mirroring the
//! capture → target → bubble shape of DOM-style responder chains:
//!
//! 1. [`Scope::Capture`] subscriptions (document-level, before delivery),
//! 2. [`Scope::Target`] subscriptions whose key equals the event's target,
//! 3. [`Scope::Bubble`] subscriptions (document-level, after delivery),
//!
//! each in registration order. The subscriber list is snapshotted before any
//! callback runs, so callbacks may freely subscribe or unsubscribe:
//! subscriptions added during dispatch are not invoked for the in-flight
//! event, and removed ones are skipped.
//!
//! The hub is generic over the application's element key type `K`, like the
//! rest of the Awning kernels; it assumes nothing about what an "element"
//! is. Events carry a caller-supplied timestamp so downstream state machines
//! never read a clock.
//!
//! ## Minimal example
//!
//! ```
//! use awning_events::{Event, EventHub, Scope};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let hub: EventHub<u32> = EventHub::new();
//! let order = Rc::new(RefCell::new(Vec::new()));
//!
//! let o = order.clone();
//! let _capture = hub.subscribe("mousedown", Scope::Capture, move |_| o.borrow_mut().push("capture"));
//! let o = order.clone();
//! let _anchor = hub.subscribe("mousedown", Scope::Target(7), move |_| o.borrow_mut().push("anchor"));
//! let o = order.clone();
//! let _doc = hub.subscribe("mousedown", Scope::Bubble, move |_| o.borrow_mut().push("document"));
//!
//! hub.dispatch(&Event { name: "mousedown", target: Some(7), time_ms: 0 });
//! assert_eq!(*order.borrow(), ["capture", "anchor", "document"]);
//! ```
//!
//! Dispatch is single-threaded and non-reentrant: a callback must not call
//! [`EventHub::dispatch`] again while a dispatch is in flight.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

/// An event flowing through the hub.
///
/// `name` is a caller-defined token (`"mouseenter"`, `"scroll"`, or any
/// custom trigger name); `target` is the logical element the event
/// originated on, when there is one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Event<'a, K> {
    /// Event name, matched exactly against subscription names.
    pub name: &'a str,
    /// The element the event originated on; `None` for window-level events.
    pub target: Option<K>,
    /// Caller-supplied timestamp in milliseconds.
    pub time_ms: u64,
}

/// Where a subscription sits in the dispatch order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope<K> {
    /// Document-level, invoked before target delivery.
    Capture,
    /// Invoked when the event's target equals this key.
    Target(K),
    /// Document-level, invoked after target delivery.
    Bubble,
}

type Handler<K> = Rc<RefCell<dyn FnMut(&Event<'_, K>)>>;

struct SubEntry<K> {
    id: u64,
    scope: Scope<K>,
    handler: Handler<K>,
}

struct HubInner<K> {
    subs: HashMap<String, Vec<SubEntry<K>>>,
    next_id: u64,
}

/// The shared dispatcher. Cheap to clone; clones share one registry.
pub struct EventHub<K> {
    inner: Rc<RefCell<HubInner<K>>>,
}

impl<K> Clone for EventHub<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K> fmt::Debug for EventHub<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<K> Default for EventHub<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EventHub<K> {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                subs: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Total number of live subscriptions, across all event names.
    ///
    /// Useful for asserting clean teardown in tests.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subs.values().map(Vec::len).sum()
    }
}

impl<K: Copy + Eq> EventHub<K> {
    /// Register `handler` for events named `name` in the given scope.
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe<F>(&self, name: &str, scope: Scope<K>, handler: F) -> Subscription<K>
    where
        F: FnMut(&Event<'_, K>) + 'static,
    {
        let handler: Handler<K> = Rc::new(RefCell::new(handler));
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subs
            .entry(name.to_string())
            .or_default()
            .push(SubEntry { id, scope, handler });
        Subscription {
            hub: Rc::downgrade(&self.inner),
            name: name.to_string(),
            id,
        }
    }

    /// Deliver `event` to every matching subscription, capture → target →
    /// bubble, registration order within each group.
    pub fn dispatch(&self, event: &Event<'_, K>) {
        // Snapshot under a short borrow so handlers can re-enter the
        // registry (subscribe/unsubscribe) while we iterate.
        let snapshot: Vec<(u64, Scope<K>, Handler<K>)> = {
            let inner = self.inner.borrow();
            match inner.subs.get(event.name) {
                Some(entries) => entries
                    .iter()
                    .map(|e| (e.id, e.scope, Rc::clone(&e.handler)))
                    .collect(),
                None => return,
            }
        };

        for phase in 0..3 {
            for (id, scope, handler) in &snapshot {
                let in_phase = match (phase, scope) {
                    (0, Scope::Capture) => true,
                    (1, Scope::Target(k)) => Some(*k) == event.target,
                    (2, Scope::Bubble) => true,
                    _ => false,
                };
                if !in_phase {
                    continue;
                }
                // Skip entries a previous handler removed mid-dispatch.
                if !self.is_registered(event.name, *id) {
                    continue;
                }
                (&mut *handler.borrow_mut())(event);
            }
        }
    }

    fn is_registered(&self, name: &str, id: u64) -> bool {
        self.inner
            .borrow()
            .subs
            .get(name)
            .is_some_and(|entries| entries.iter().any(|e| e.id == id))
    }
}

/// A live registration with an [`EventHub`]. Dropping it unregisters the
/// handler — teardown can never leak a listener.
#[must_use = "dropping a Subscription immediately unregisters its handler"]
pub struct Subscription<K> {
    hub: Weak<RefCell<HubInner<K>>>,
    name: String,
    id: u64,
}

impl<K> fmt::Debug for Subscription<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}

impl<K> Drop for Subscription<K> {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            let mut inner = inner.borrow_mut();
            if let Some(entries) = inner.subs.get_mut(&self.name) {
                entries.retain(|e| e.id != self.id);
                if entries.is_empty() {
                    inner.subs.remove(&self.name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn log_hub() -> (EventHub<u32>, Rc<RefCell<Vec<&'static str>>>) {
        (EventHub::new(), Rc::new(RefCell::new(Vec::new())))
    }

    #[test]
    fn dispatch_walks_capture_target_bubble() {
        let (hub, log) = log_hub();
        let l = log.clone();
        let _bubble = hub.subscribe("click", Scope::Bubble, move |_| l.borrow_mut().push("bubble"));
        let l = log.clone();
        let _target =
            hub.subscribe("click", Scope::Target(1), move |_| l.borrow_mut().push("target"));
        let l = log.clone();
        let _capture =
            hub.subscribe("click", Scope::Capture, move |_| l.borrow_mut().push("capture"));

        hub.dispatch(&Event {
            name: "click",
            target: Some(1),
            time_ms: 0,
        });
        assert_eq!(*log.borrow(), vec!["capture", "target", "bubble"]);
    }

    #[test]
    fn target_subscriptions_only_see_their_own_target() {
        let (hub, log) = log_hub();
        let l = log.clone();
        let _mine = hub.subscribe("click", Scope::Target(1), move |_| l.borrow_mut().push("mine"));
        let l = log.clone();
        let _other =
            hub.subscribe("click", Scope::Target(2), move |_| l.borrow_mut().push("other"));

        hub.dispatch(&Event {
            name: "click",
            target: Some(1),
            time_ms: 0,
        });
        hub.dispatch(&Event {
            name: "click",
            target: None,
            time_ms: 0,
        });
        assert_eq!(*log.borrow(), vec!["mine"]);
    }

    #[test]
    fn names_are_matched_exactly() {
        let (hub, log) = log_hub();
        let l = log.clone();
        let _s = hub.subscribe("mouseenter", Scope::Bubble, move |_| l.borrow_mut().push("hit"));

        hub.dispatch(&Event {
            name: "mouseleave",
            target: None,
            time_ms: 0,
        });
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dropping_the_subscription_unregisters() {
        let (hub, log) = log_hub();
        let l = log.clone();
        let sub = hub.subscribe("click", Scope::Bubble, move |_| l.borrow_mut().push("hit"));
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
        hub.dispatch(&Event {
            name: "click",
            target: None,
            time_ms: 0,
        });
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn handler_sees_event_fields() {
        let hub: EventHub<u32> = EventHub::new();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let _sub = hub.subscribe("scroll", Scope::Capture, move |e| {
            *s.borrow_mut() = Some((e.target, e.time_ms));
        });

        hub.dispatch(&Event {
            name: "scroll",
            target: None,
            time_ms: 1234,
        });
        assert_eq!(*seen.borrow(), Some((None, 1234)));
    }

    #[test]
    fn subscription_added_during_dispatch_is_not_invoked_for_that_event() {
        let (hub, log) = log_hub();
        let late: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));

        let hub2 = hub.clone();
        let late2 = late.clone();
        let l = log.clone();
        let _outer = hub.subscribe("click", Scope::Capture, move |_| {
            l.borrow_mut().push("outer");
            let l2 = l.clone();
            *late2.borrow_mut() = Some(hub2.subscribe("click", Scope::Bubble, move |_| {
                l2.borrow_mut().push("late")
            }));
        });

        hub.dispatch(&Event {
            name: "click",
            target: None,
            time_ms: 0,
        });
        assert_eq!(*log.borrow(), vec!["outer"]);

        // The late subscription is live for the next event.
        hub.dispatch(&Event {
            name: "click",
            target: None,
            time_ms: 1,
        });
        assert_eq!(*log.borrow(), vec!["outer", "outer", "late"]);
    }

    #[test]
    fn subscription_removed_during_dispatch_is_skipped() {
        let (hub, log) = log_hub();
        let victim: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));

        let v = victim.clone();
        let l = log.clone();
        let _first = hub.subscribe("click", Scope::Capture, move |_| {
            l.borrow_mut().push("first");
            // Unsubscribe the bubble handler before it runs.
            v.borrow_mut().take();
        });
        let l = log.clone();
        *victim.borrow_mut() =
            Some(hub.subscribe("click", Scope::Bubble, move |_| l.borrow_mut().push("victim")));

        hub.dispatch(&Event {
            name: "click",
            target: None,
            time_ms: 0,
        });
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn subscription_outliving_the_hub_drops_cleanly() {
        let hub: EventHub<u32> = EventHub::new();
        let sub = hub.subscribe("click", Scope::Bubble, |_| {});
        drop(hub);
        drop(sub); // weak upgrade fails; nothing to unregister
    }
}
