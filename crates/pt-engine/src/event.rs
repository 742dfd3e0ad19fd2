//! The event queue — a min-heap of scheduled process wake-ups.
//!
//! Ordering is `(time, insertion sequence)`.  The sequence tie-break is
//! load-bearing for determinism: when two processes are due at the same
//! minute, whichever scheduled its wake-up first runs first, so two runs with
//! the same seed replay the exact same interleaving.  Times are `f64`;
//! `total_cmp` keeps the heap ordering total.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use pt_core::SimTime;

use crate::process::ProcessId;

/// One pending wake-up.
#[derive(Copy, Clone, Debug)]
pub struct ScheduledWake {
    pub at:   SimTime,
    /// Global insertion counter; strictly increasing across the whole run.
    pub seq:  u64,
    pub proc: ProcessId,
}

impl Ord for ScheduledWake {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.total_cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledWake {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledWake {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledWake {}

/// Priority queue of wake-ups, earliest first.
#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<Reverse<ScheduledWake>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `proc` to wake at `at`.
    pub fn push(&mut self, at: SimTime, proc: ProcessId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(ScheduledWake { at, seq, proc }));
    }

    /// Remove and return the earliest wake-up.
    pub fn pop(&mut self) -> Option<ScheduledWake> {
        self.heap.pop().map(|Reverse(w)| w)
    }

    /// Time of the earliest pending wake-up, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(w)| w.at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
