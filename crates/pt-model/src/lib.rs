//! `pt-model` — world state for the pt transit simulator.
//!
//! Everything a single run owns lives in one [`World`]: id-indexed arenas of
//! stations, routes, itineraries, people groups, and spawned vehicles, plus
//! the station → itinerary lookup used by suburb demand injection.  There is
//! no process-global registry of any kind; two concurrent runs never share
//! state.
//!
//! | Module         | Contents                                            |
//! |----------------|-----------------------------------------------------|
//! | [`station`]    | `Station` (bays, waiting list, people-over-time)    |
//! | [`route`]      | `Route`, `RouteKind`, `VehicleService`, `WalkLink`  |
//! | [`trip`]       | `Trip` timetables                                   |
//! | [`itinerary`]  | `Itinerary`, `Leg`, cursor queries                  |
//! | [`people`]     | `PeopleGroup`, visit log                            |
//! | [`transporter`]| `Transporter` (bus/train vehicle instances)         |
//! | [`suburb`]     | `Suburb` demand pools                               |
//! | [`context`]    | `ItineraryIndex` (station → itineraries)            |
//! | [`world`]      | the arenas plus `board`/split logic                 |
//! | [`loader`]     | serde `ScenarioSpec` → `World` resolution           |

pub mod context;
pub mod error;
pub mod itinerary;
pub mod loader;
pub mod people;
pub mod route;
pub mod station;
pub mod suburb;
pub mod transporter;
pub mod trip;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use context::ItineraryIndex;
pub use error::{ModelError, ModelResult};
pub use itinerary::{Itinerary, Leg};
pub use loader::{ScenarioSpec, load_scenario, load_scenario_str};
pub use people::{PeopleGroup, VisitEntry};
pub use route::{Route, RouteKind, VehicleService, WalkLink, WalkRecord};
pub use station::Station;
pub use suburb::Suburb;
pub use transporter::{Transporter, VehicleKind};
pub use trip::{TimetableEntry, Trip};
pub use world::World;
