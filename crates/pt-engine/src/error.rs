//! Engine error types.

use thiserror::Error;

/// Errors that abort a simulation run.
///
/// Almost everything the engine encounters is a modelling condition, not an
/// error: empty boardings, full vehicles, and groups with nowhere to go are
/// reported through observer hooks and the run continues.  Only corrupt input
/// that strict mode refuses to paper over lands here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A timetable claims a vehicle reaches its next stop in zero or negative
    /// minutes.  Outside strict mode this is clamped to one minute instead.
    #[error(
        "corrupt timetable on route {route}: travel delta {delta} min from {from} to {to}"
    )]
    CorruptTimetable {
        route: String,
        from:  String,
        to:    String,
        delta: i64,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
