// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awning Timing: host-agnostic timer queue and debounce primitives.
//!
//! Overlay controllers suspend in exactly two ways: a delayed show/hide
//! intent, and a debounce window before re-measuring on viewport changes.
//! This crate provides both as plain data structures driven by
//! caller-supplied timestamps — the library never reads a clock, so hosts
//! with real event loops and tests with synthetic time use the same code
//! path.
//!
//! - [`queue::TimerQueue`]: deadline-ordered one-shot timers with exact
//!   cancellation and a [`next_deadline`](queue::TimerQueue::next_deadline)
//!   the host can sleep on.
//! - [`debounce::Debounce`]: a trailing-edge coalescer — repeated pokes
//!   within the window collapse to a single fire, with explicit
//!   cancellation for teardown.
//!
//! Timestamps are `u64` milliseconds from an arbitrary epoch; only their
//! ordering and differences matter.
//!
//! ## Minimal example
//!
//! ```
//! use awning_timing::queue::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let hide = timers.schedule(1200, "hide");
//! let _show = timers.schedule(1000, "show");
//! timers.cancel(hide);
//!
//! assert_eq!(timers.next_deadline(), Some(1000));
//! assert_eq!(timers.poll(1500), vec!["show"]);
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod debounce;
pub mod queue;

pub use debounce::Debounce;
pub use queue::{TimerId, TimerQueue};
