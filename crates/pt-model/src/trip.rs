//! `Trip` — one vehicle's planned timetable along a route.

use pt_core::{StationId, TripId};

/// One scheduled stop within a trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimetableEntry {
    pub station: StationId,
    /// Scheduled minute of day (wall clock).
    pub minute: u32,
}

/// An ordered timetable describing one vehicle's planned run.
///
/// Immutable once constructed.  A trip sits in its route's pending pool until
/// a spawn event consumes it; it then moves into the spawned vehicle and can
/// never spawn a second one.
#[derive(Clone, Debug)]
pub struct Trip {
    pub id: TripId,
    pub timetable: Vec<TimetableEntry>,
}

impl Trip {
    /// # Panics
    /// Panics in debug mode if the timetable has fewer than two entries —
    /// the loader rejects these before construction.
    pub fn new(id: TripId, timetable: Vec<TimetableEntry>) -> Self {
        debug_assert!(timetable.len() >= 2, "trip timetable needs at least two stops");
        Self { id, timetable }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timetable.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timetable.is_empty()
    }

    #[inline]
    pub fn entry(&self, index: usize) -> &TimetableEntry {
        &self.timetable[index]
    }

    /// Index of the final scheduled stop.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.timetable.len() - 1
    }

    /// Earliest scheduled minute (first stop).
    #[inline]
    pub fn first_minute(&self) -> u32 {
        self.timetable[0].minute
    }

    /// Latest scheduled minute (final stop).
    #[inline]
    pub fn last_minute(&self) -> u32 {
        self.timetable[self.last_index()].minute
    }

    /// Position of the first entry scheduled at exactly `minute`, if any.
    /// Mid-route spawns use this to place a vehicle already in service when
    /// the window opens.
    pub fn index_at_minute(&self, minute: u32) -> Option<usize> {
        self.timetable.iter().position(|e| e.minute == minute)
    }
}
