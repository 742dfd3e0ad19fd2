//! `Suburb` — a population pool that injects demand at nearby stations.

use pt_core::StationId;

/// A suburb's demand configuration and remaining pool.
///
/// Weights are percentages of a round's target, independently per station;
/// they need not sum to 100.  Total people injected over a run never exceeds
/// `population` (rounding only ever under-distributes).
#[derive(Clone, Debug)]
pub struct Suburb {
    pub name: String,

    /// `(station, percent)` — the stations this suburb feeds.
    pub weights: Vec<(StationId, f64)>,

    /// Total people this suburb may inject over the whole run.
    pub population: u32,

    /// People not yet injected.
    pub remaining: u32,

    /// Inject on wall minutes where `wall % frequency == 0`.
    pub frequency: u32,

    /// Number of scheduled distribution rounds; a final unbounded round
    /// afterwards drains any remainder.
    pub max_rounds: u32,
    pub rounds_done: u32,

    /// Inactive suburbs are configured but never scheduled.
    pub active: bool,
}

impl Suburb {
    pub fn new(
        name:       impl Into<String>,
        weights:    Vec<(StationId, f64)>,
        population: u32,
        frequency:  u32,
        max_rounds: u32,
        active:     bool,
    ) -> Self {
        Self {
            name: name.into(),
            weights,
            population,
            remaining: population,
            frequency: frequency.max(1),
            max_rounds,
            rounds_done: 0,
            active,
        }
    }

    /// People to aim for in one scheduled round: `ceil(population / rounds)`.
    pub fn round_target(&self) -> u32 {
        if self.max_rounds == 0 {
            self.population
        } else {
            self.population.div_ceil(self.max_rounds)
        }
    }

    /// `true` while scheduled rounds remain.
    #[inline]
    pub fn rounds_remaining(&self) -> bool {
        self.rounds_done < self.max_rounds
    }

    /// `true` if every station weight is zero — nothing can ever be placed.
    pub fn all_weights_zero(&self) -> bool {
        self.weights.iter().all(|&(_, w)| w <= 0.0)
    }
}
