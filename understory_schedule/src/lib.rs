// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_schedule --heading-base-level=0

//! Understory Schedule: a deterministic, `no_std` deferred-event queue.
//!
//! ## Overview
//!
//! UI components often need "do this a little later": let a style change apply before a
//! transition starts, fall back when a transition-end signal never arrives, debounce a stream
//! of input samples. Instead of handing closures to a platform timer, components own a
//! [`Schedule`] of their own typed events and drain it from an `advance_to(now)` entry point.
//!
//! - Time is a [`Duration`] since an arbitrary origin chosen by the host.
//! - [`Schedule::after`] returns a [`TimerToken`] which can [`cancel`](Schedule::cancel) the event.
//! - [`Schedule::pop_due`] yields due events in expiry order, moving the clock to each
//!   event's deadline first, so anything scheduled while handling it is relative to when it
//!   was supposed to fire.
//!
//! Hosts drive the clock from their frame loop; tests drive it by hand, which makes animation
//! sequencing fully deterministic.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_schedule::Schedule;
//!
//! #[derive(Debug, PartialEq)]
//! enum Tick { Animate, Cleanup }
//!
//! let mut s = Schedule::new();
//! let _ = s.after(Duration::from_millis(20), Tick::Animate);
//! let cleanup = s.after(Duration::from_millis(500), Tick::Cleanup);
//!
//! let mut fired = Vec::new();
//! while let Some((_, ev)) = s.pop_due(Duration::from_millis(100)) {
//!     fired.push(ev);
//! }
//! assert_eq!(fired, vec![Tick::Animate]);
//! assert!(s.cancel(cleanup));
//! assert!(s.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

/// Delay used by [`Schedule::defer`] when a caller has no particular latency in mind.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Handle to a scheduled event.
///
/// Tokens are unique for the lifetime of a [`Schedule`] and never reused, so cancelling a
/// token whose event already fired is a harmless no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Clone, Debug)]
struct Pending<E> {
    deadline: Duration,
    token: TimerToken,
    event: E,
}

/// A queue of typed events keyed by deadline, plus the clock that drives it.
///
/// ## Ordering
///
/// Events fire in deadline order. Events sharing a deadline fire in the order they were
/// scheduled.
#[derive(Clone, Debug)]
pub struct Schedule<E> {
    now: Duration,
    next_token: u64,
    // Sorted by (deadline, token); tokens increase monotonically so this is also scheduling order.
    pending: Vec<Pending<E>>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Schedule<E> {
    /// Create an empty schedule with its clock at zero.
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_token: 1,
            pending: Vec::new(),
        }
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending event, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.first().map(|p| p.deadline)
    }

    /// Returns true if `token` refers to an event that has neither fired nor been cancelled.
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    /// Schedule `event` to fire `delay` after the current clock value.
    pub fn after(&mut self, delay: Duration, event: E) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let deadline = self.now.saturating_add(delay);
        // Insert after every entry with deadline <= ours to keep scheduling order on ties.
        let at = self.pending.partition_point(|p| p.deadline <= deadline);
        self.pending.insert(
            at,
            Pending {
                deadline,
                token,
                event,
            },
        );
        token
    }

    /// Schedule `event` after [`DEFAULT_DELAY`].
    pub fn defer(&mut self, event: E) -> TimerToken {
        self.after(DEFAULT_DELAY, event)
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.pending.iter().position(|p| p.token == token) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    /// Cancel the event behind `slot`, if any, leaving `None` behind.
    ///
    /// Convenience for components that keep at most one timer of a kind.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerToken>) -> bool {
        slot.take().is_some_and(|t| self.cancel(t))
    }

    /// Drop every pending event without firing it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Pop the earliest event due at or before `until`.
    ///
    /// When an event is returned the clock is moved to its deadline. When nothing is due the
    /// clock is moved to `until` and `None` is returned. The clock never moves backwards.
    ///
    /// Call this in a loop: handling an event may schedule further events that are also due.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerToken, E)> {
        if self.pending.first().is_some_and(|p| p.deadline <= until) {
            let p = self.pending.remove(0);
            self.now = self.now.max(p.deadline);
            Some((p.token, p.event))
        } else {
            self.now = self.now.max(until);
            None
        }
    }
}
