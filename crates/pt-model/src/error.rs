//! Model and scenario-resolution errors.

use thiserror::Error;

/// Errors raised while building or mutating a [`World`][crate::World].
///
/// `MissingTrips` is the loader's one hard scheduling failure: an itinerary that
/// references a vehicle route with no usable timetable cannot be simulated,
/// so the run must refuse to start rather than silently skip the leg.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("station {0:?} referenced but not declared")]
    UnknownStation(String),

    #[error("route {0:?} referenced but not declared")]
    UnknownRoute(String),

    #[error("no trips for route {route:?} within the simulated window")]
    MissingTrips { route: String },

    #[error("trip timetable for route {route:?} has fewer than two stops")]
    DegenerateTimetable { route: String },

    #[error("walking leg from {start:?} has no destination station")]
    WalkWithoutDestination { start: String },

    #[error("itinerary {0} has no legs")]
    EmptyItinerary(u32),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
