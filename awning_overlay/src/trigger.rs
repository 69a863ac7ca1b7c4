// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility state machine: CLOSED ⇄ OPEN with delayed trigger intents.
//!
//! [`TriggerMachine`] owns nothing but state: which trigger names mean show
//! or hide comes in as [`TriggerConfig`], timestamps come from the caller,
//! and positioning is someone else's job. The machine only answers "did
//! this input open or close us?" via [`Transition`] values.
//!
//! ## Semantics
//!
//! - A trigger event picks its delay from the *current* state (hide delay
//!   while open, show delay while closed) and always cancels the pending
//!   intent first, so contradicting triggers are last-writer-wins rather
//!   than queued.
//! - A delayed intent captures the open-ness at schedule time. When it
//!   fires, the trigger name is matched against that captured state: a
//!   `mouseleave` scheduled while open still means hide even if something
//!   opened us again meanwhile, but it produces no transition when the
//!   state already matches its outcome.
//! - [`show`](TriggerMachine::show) and [`hide`](TriggerMachine::hide)
//!   bypass trigger-name matching entirely. `hide` is suppressible exactly
//!   once after
//!   [`note_owned_interaction`](TriggerMachine::note_owned_interaction): a
//!   press that lands on the overlay itself must not dismiss it via the
//!   document-level handler that runs right after.
//!
//! ## Minimal example
//!
//! ```
//! use awning_overlay::trigger::{Transition, TriggerConfig, TriggerMachine, TriggerSet};
//!
//! let cfg = TriggerConfig {
//!     show: TriggerSet::single("mouseenter"),
//!     hide: TriggerSet::single("mouseleave"),
//!     show_delay_ms: 100,
//!     ..Default::default()
//! };
//! let mut machine = TriggerMachine::new(false);
//!
//! assert_eq!(machine.on_trigger(&cfg, "mouseenter", 1000), None); // delayed
//! assert_eq!(machine.next_deadline(), Some(1100));
//! assert_eq!(machine.poll(&cfg, 1100), Some(Transition::Opened));
//! assert!(machine.is_open());
//! ```

use core::fmt;

use smallvec::SmallVec;

use awning_timing::{TimerId, TimerQueue};

/// A deduplicated set of trigger event names.
///
/// Configurations accept one name or many; insertion order is kept and
/// duplicates are dropped, so each name binds exactly one handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerSet(SmallVec<[String; 2]>);

impl TriggerSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding one name.
    #[must_use]
    pub fn single(name: &str) -> Self {
        let mut set = Self::new();
        set.insert(name);
        set
    }

    /// Add a name; duplicates are ignored.
    pub fn insert(&mut self, name: &str) {
        if !self.contains(name) {
            self.0.push(name.to_string());
        }
    }

    /// Whether the set holds `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Iterate the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Which events show and hide, and how long each intent is delayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Event names that open while closed.
    pub show: TriggerSet,
    /// Event names that close while open.
    pub hide: TriggerSet,
    /// Delay before a show intent takes effect.
    pub show_delay_ms: u64,
    /// Delay before a hide intent takes effect.
    pub hide_delay_ms: u64,
}

impl TriggerConfig {
    /// The deduplicated union of show and hide names: the events to bind
    /// on the anchor.
    #[must_use]
    pub fn event_names(&self) -> TriggerSet {
        self.show.iter().chain(self.hide.iter()).collect()
    }
}

/// An open/close transition the machine performed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// CLOSED → OPEN.
    Opened,
    /// OPEN → CLOSED.
    Closed,
}

#[derive(Clone, Debug)]
struct PendingToggle {
    event: String,
    was_open: bool,
}

/// The CLOSED ⇄ OPEN state machine. See the module docs for semantics.
pub struct TriggerMachine {
    open: bool,
    prevent_hide: bool,
    timers: TimerQueue<PendingToggle>,
    pending: Option<TimerId>,
}

impl fmt::Debug for TriggerMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerMachine")
            .field("open", &self.open)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl TriggerMachine {
    /// Create a machine in the given initial state.
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self {
            open,
            prevent_hide: false,
            timers: TimerQueue::new(),
            pending: None,
        }
    }

    /// Whether the machine is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a delayed intent is pending.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The deadline of the pending intent, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Feed a trigger event observed on the anchor at `now`.
    ///
    /// Any pending intent is cancelled first. With a zero delay the toggle
    /// applies immediately; otherwise it is scheduled and [`poll`] will
    /// apply it once the delay elapses.
    ///
    /// [`poll`]: Self::poll
    pub fn on_trigger(
        &mut self,
        cfg: &TriggerConfig,
        event: &str,
        now: u64,
    ) -> Option<Transition> {
        let delay = if self.open {
            cfg.hide_delay_ms
        } else {
            cfg.show_delay_ms
        };
        self.cancel_pending();
        let toggle = PendingToggle {
            event: event.to_string(),
            was_open: self.open,
        };
        if delay == 0 {
            self.apply_toggle(cfg, &toggle)
        } else {
            self.pending = Some(self.timers.schedule(now + delay, toggle));
            None
        }
    }

    /// Fire a due pending intent, if any.
    pub fn poll(&mut self, cfg: &TriggerConfig, now: u64) -> Option<Transition> {
        let due = self.timers.poll(now);
        if due.is_empty() {
            return None;
        }
        self.pending = None;
        // At most one intent is ever pending; apply the last written.
        due.iter().rev().find_map(|t| self.apply_toggle(cfg, t))
    }

    /// Open unconditionally, cancelling any pending intent.
    pub fn show(&mut self) -> Option<Transition> {
        self.cancel_pending();
        if self.open {
            None
        } else {
            self.open = true;
            Some(Transition::Opened)
        }
    }

    /// Close unconditionally, unless the one-shot interaction flag is set,
    /// which consumes the flag and suppresses this single hide.
    pub fn hide(&mut self) -> Option<Transition> {
        if self.prevent_hide {
            self.prevent_hide = false;
            return None;
        }
        self.cancel_pending();
        if self.open {
            self.open = false;
            Some(Transition::Closed)
        } else {
            None
        }
    }

    /// Record that the press being processed originated on the anchor or
    /// the overlay itself: the document-level dismiss that follows in the
    /// same gesture is suppressed once. Only effective while open.
    pub fn note_owned_interaction(&mut self) {
        self.prevent_hide = self.open;
    }

    /// Force the state from a controlled `open` prop, cancelling any
    /// pending intent. Bypasses the interaction flag.
    pub fn set_open(&mut self, open: bool) -> Option<Transition> {
        self.cancel_pending();
        if self.open == open {
            None
        } else {
            self.open = open;
            Some(if open {
                Transition::Opened
            } else {
                Transition::Closed
            })
        }
    }

    /// Cancel the pending intent, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
    }

    fn apply_toggle(&mut self, cfg: &TriggerConfig, toggle: &PendingToggle) -> Option<Transition> {
        let wants_toggle = if toggle.was_open {
            cfg.hide.contains(&toggle.event)
        } else {
            cfg.show.contains(&toggle.event)
        };
        if !wants_toggle {
            return None;
        }
        let target = !toggle.was_open;
        if self.open == target {
            return None;
        }
        self.open = target;
        Some(if target {
            Transition::Opened
        } else {
            Transition::Closed
        })
    }
}
