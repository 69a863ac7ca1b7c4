// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered one-shot timers with exact cancellation.
//!
//! ## Usage
//!
//! 1) [`schedule`](TimerQueue::schedule) a payload for an absolute deadline;
//!    keep the returned [`TimerId`] if you may need to cancel.
//! 2) Ask [`next_deadline`](TimerQueue::next_deadline) when the host should
//!    wake up next.
//! 3) Call [`poll`](TimerQueue::poll) with the current time; every due
//!    payload is returned in deadline order and removed from the queue.
//!
//! Identifiers are monotonic and never reused, so cancelling an already
//! fired or cancelled timer is a harmless no-op rather than an accidental
//! hit on an unrelated entry.

use alloc::vec::Vec;

/// Handle to a scheduled timer.
///
/// Ids are unique for the lifetime of the queue; a stale id never aliases a
/// newer timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: u64,
    payload: T,
}

/// A queue of one-shot timers keyed by absolute millisecond deadlines.
///
/// The queue is host-agnostic: it never reads a clock, it only compares the
/// timestamps the caller passes in.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire once `now >= at_ms`.
    pub fn schedule(&mut self, at_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline: at_ms,
            payload,
        });
        id
    }

    /// Cancel a scheduled timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The earliest pending deadline, if any. Hosts can sleep until then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fire everything due at `now`, in deadline order (ties in schedule
    /// order), removing fired entries from the queue.
    pub fn poll(&mut self, now: u64) -> Vec<T> {
        let mut due: Vec<Entry<T>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.deadline, e.id.0));
        due.into_iter().map(|e| e.payload).collect()
    }
}
