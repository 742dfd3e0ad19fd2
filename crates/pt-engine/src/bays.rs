//! Per-station boarding-bay pools.
//!
//! A bay pool is the one real contention point in the model: it caps how many
//! transporters can service a station at once.  There is no threading here —
//! the pool encodes real-world capacity and queueing order, not memory
//! safety.  A vehicle that cannot dock parks itself in the waiter queue and
//! goes dormant; each release pops one waiter for the engine to reschedule.
//!
//! Fairness is whatever the scheduler's wake order provides: a woken waiter
//! re-requests the bay on its next step, and a vehicle arriving in the same
//! instant can slip in ahead of it.  That matches the modelled behaviour of
//! the reference queue, which was never a strict priority queue either.

use std::collections::VecDeque;

use crate::process::ProcessId;

/// Bounded docking resource for one station.
#[derive(Debug)]
pub struct BayPool {
    capacity: u32,
    in_use:   u32,
    waiters:  VecDeque<ProcessId>,
}

impl BayPool {
    /// A pool with `capacity` bays.  Zero-bay stations would deadlock every
    /// vehicle touching them, so the floor is one.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity: capacity.max(1),
            in_use:   0,
            waiters:  VecDeque::new(),
        }
    }

    /// Try to dock.  On success the caller holds a bay until it calls
    /// [`release`](Self::release); on failure the caller is queued and must
    /// go dormant until a release wakes it.
    pub fn try_acquire(&mut self, proc: ProcessId) -> bool {
        if self.in_use < self.capacity {
            self.in_use += 1;
            true
        } else {
            self.waiters.push_back(proc);
            false
        }
    }

    /// Free one bay.  Returns the next queued waiter, if any; the engine is
    /// responsible for scheduling it.
    pub fn release(&mut self) -> Option<ProcessId> {
        debug_assert!(self.in_use > 0, "release without a held bay");
        self.in_use = self.in_use.saturating_sub(1);
        self.waiters.pop_front()
    }

    #[inline]
    pub fn in_use(&self) -> u32 {
        self.in_use
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Vehicles currently queued for a bay.
    #[inline]
    pub fn queued(&self) -> usize {
        self.waiters.len()
    }
}
