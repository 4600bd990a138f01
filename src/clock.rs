//! Virtual time and timer scheduling.
//!
//! The dispatch core never sleeps. Every "wait" is a timer scheduled on a
//! [`Clock`]; the owner of the clock fires due timers one at a time, which
//! makes the whole system a single-threaded cooperative event loop.
//!
//! # Ordering
//! Timers fire in non-decreasing order of due time. Timers due at the same
//! instant fire in the order they were scheduled (FIFO).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Identifier of a scheduled timer.
pub type TimerId = u64;

/// Source of virtual time that accepts deferred events.
pub trait Clock<E> {
    /// Current virtual time (ms).
    fn now_ms(&self) -> u64;

    /// Schedules `event` to fire `delay_ms` after now.
    fn schedule_after(&mut self, delay_ms: u64, event: E) -> TimerId;
}

/// A timer that has come due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<E> {
    /// Timer identifier returned at scheduling.
    pub id: TimerId,
    /// Virtual time the timer was due (ms).
    pub due_ms: u64,
    /// Scheduled payload.
    pub event: E,
}

struct Scheduled<E> {
    due_ms: u64,
    seq: u64,
    event: E,
}

impl<E> Scheduled<E> {
    fn key(&self) -> (u64, u64) {
        (self.due_ms, self.seq)
    }
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Deterministic clock that jumps straight to the next due timer.
///
/// # Example
/// ```
/// use u_lift::clock::{Clock, VirtualClock};
///
/// let mut clock = VirtualClock::new();
/// clock.schedule_after(500, "b");
/// clock.schedule_after(100, "a");
///
/// let first = clock.pop_due(1_000).unwrap();
/// assert_eq!((first.due_ms, first.event), (100, "a"));
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub struct VirtualClock<E> {
    now_ms: u64,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Scheduled<E>>>,
}

impl<E> VirtualClock<E> {
    /// Creates a clock at t=0 with no pending timers.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a clock at the given time.
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Number of timers not yet fired.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.peek().map(|Reverse(s)| s.due_ms)
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer<E>> {
        if self.next_due_ms()? > until_ms {
            return None;
        }
        let Reverse(scheduled) = self.pending.pop()?;
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(FiredTimer {
            id: scheduled.seq,
            due_ms: scheduled.due_ms,
            event: scheduled.event,
        })
    }

    /// Moves the clock forward to `until_ms` without firing anything.
    ///
    /// Time never goes backwards; an earlier `until_ms` is ignored.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<E> Default for VirtualClock<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clock<E> for VirtualClock<E> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_after(&mut self, delay_ms: u64, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            event,
        }));
        seq
    }
}

impl<E> std::fmt::Debug for VirtualClock<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualClock")
            .field("now_ms", &self.now_ms)
            .field("pending", &self.pending.len())
            .field("next_due_ms", &self.next_due_ms())
            .finish()
    }
}
