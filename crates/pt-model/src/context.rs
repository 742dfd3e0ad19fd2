//! `ItineraryIndex` — station → itineraries that can pass through it.
//!
//! Built once per run after itinerary resolution and owned by the world, so
//! there is nothing process-global to contaminate a second run.  Suburb
//! demand injection asks it which itineraries a new group at a given station
//! could plausibly be executing.

use pt_core::{ItineraryId, StationId};
use rustc_hash::FxHashMap;

use crate::itinerary::Itinerary;
use crate::route::Route;

/// Reverse lookup from a station to every itinerary with a leg whose route
/// passes through that station.
#[derive(Debug, Default)]
pub struct ItineraryIndex {
    by_station: FxHashMap<StationId, Vec<ItineraryId>>,
}

impl ItineraryIndex {
    /// Index all of `itineraries` by the stops of their legs' routes.
    ///
    /// O(itineraries × legs × stops); runs once per world build.
    pub fn build(itineraries: &[Itinerary], routes: &[Route]) -> Self {
        let mut by_station: FxHashMap<StationId, Vec<ItineraryId>> = FxHashMap::default();
        for itin in itineraries {
            for leg in &itin.legs {
                for &stop in &routes[leg.route.index()].stops {
                    let entry = by_station.entry(stop).or_default();
                    if !entry.contains(&itin.id) {
                        entry.push(itin.id);
                    }
                }
            }
        }
        Self { by_station }
    }

    /// Itineraries that can pass through `station`, in registration order.
    pub fn candidates(&self, station: StationId) -> &[ItineraryId] {
        self.by_station.get(&station).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }
}
