//! `pt-engine` — the discrete-event core of the pt transit simulator.
//!
//! Single-threaded cooperative scheduling: every entity with ongoing
//! behaviour (vehicle, route spawn loop, walking group, suburb distributor)
//! is a logical process that only yields at a timed wait or a bay
//! acquisition.  Between those points a process step runs to completion, so
//! shared world state needs no locks; the event queue's insertion-order
//! tie-break makes two equally-seeded runs replay identically.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`engine`]   | `Engine` — the run loop and all process step handlers  |
//! | [`event`]    | `EventQueue` (time, seq) min-heap of wake-ups          |
//! | [`process`]  | `Process` arena entries and their state enums          |
//! | [`bays`]     | `BayPool` per-station docking contention               |
//! | [`service`]  | Gumbel-based load/travel/walk duration sampling        |
//! | [`observer`] | `SimObserver` event hooks                              |

pub mod bays;
pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod process;
pub mod service;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bays::BayPool;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use event::{EventQueue, ScheduledWake};
pub use observer::{NoopObserver, SimObserver};
pub use process::{Process, ProcessId, VehicleState, WalkState};
