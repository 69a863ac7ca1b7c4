// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce: coalesce bursts of pokes into one fire.
//!
//! ## Usage
//!
//! 1) [`poke`](Debounce::poke) on every stimulus (scroll, resize, prop
//!    change); each poke pushes the deadline to `now + window`.
//! 2) [`poll`](Debounce::poll) with the current time; it returns `true`
//!    exactly once per armed window, when the deadline has passed with no
//!    further pokes.
//! 3) [`cancel`](Debounce::cancel) on teardown so nothing fires afterwards.
//!
//! ## Minimal example
//!
//! ```
//! use awning_timing::debounce::Debounce;
//!
//! let mut d = Debounce::new(200);
//! d.poke(0);
//! d.poke(150); // burst: deadline moves to 350
//! assert!(!d.poll(300));
//! assert!(d.poll(350));
//! assert!(!d.poll(400)); // already fired; disarmed until the next poke
//! ```

/// A trailing-edge debouncer over caller-supplied millisecond timestamps.
#[derive(Copy, Clone, Debug)]
pub struct Debounce {
    window_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Create a debouncer with the given coalescing window.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    /// The coalescing window in milliseconds.
    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Record a stimulus at `now`, (re)arming the deadline at `now + window`.
    pub fn poke(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.window_ms));
    }

    /// Whether a fire is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if armed. Hosts can sleep until then.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Disarm without firing. Used on teardown.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Fire if the armed deadline has passed. At most one `true` per armed
    /// window; firing disarms.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
