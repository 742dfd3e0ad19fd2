//! Stochastic service-time model.
//!
//! All durations — load, deload, travel, walk — come from the same sampling
//! policy: a right-skewed Gumbel anchored at the expected duration,
//! rejection-sampled into `[expected, expected + std_dev]`.  Real service is
//! rarely faster than scheduled but often slower under congestion, so the
//! distribution never undercuts the expectation.
//!
//! | Duration | expected                      | std_dev                                  |
//! |----------|-------------------------------|------------------------------------------|
//! | load     | per-person min × people       | expected × 0.1 × ⌈congestion / 5⌉        |
//! | travel   | timetable delta               | 4 × ⌈departed-stop congestion / 10⌉      |
//! | walk     | U(5, 20) × congestion mult.   | expected / 3 × walkers / 100             |
//!
//! Congestion is the station's congestion level, `⌈waiting people / 100⌉`.

use pt_core::SimRng;
use rand_distr::{Distribution, Gumbel};

/// Rejection attempts before giving up and returning the expectation.  A
/// Gumbel located at `expected` lands in `[expected, expected + std]` more
/// than a third of the time, so the fallback is effectively unreachable.
const MAX_REJECTION_ATTEMPTS: u32 = 64;

/// Sample a duration from `Gumbel(expected, std_dev)` restricted to
/// `[expected, expected + std_dev]`.
///
/// A `std_dev` below one minute skips sampling entirely and returns
/// `expected` — tiny scales would make the rejection window degenerate.
pub fn sample_duration(rng: &mut SimRng, expected: f64, std_dev: f64) -> f64 {
    if std_dev < 1.0 {
        return expected;
    }
    let dist = match Gumbel::new(expected, std_dev) {
        Ok(d) => d,
        Err(_) => return expected,
    };
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let x = dist.sample(rng.inner());
        if x >= expected && x <= expected + std_dev {
            return x;
        }
    }
    expected
}

/// Minutes to load or deload `people` at a stop with the given congestion
/// level.
pub fn load_minutes(
    rng:               &mut SimRng,
    minutes_per_person: f64,
    people:             u32,
    congestion:         u32,
) -> f64 {
    let expected = minutes_per_person * people as f64;
    let std_dev = expected * 0.1 * (congestion as f64 / 5.0).ceil();
    sample_duration(rng, expected, std_dev)
}

/// Minutes to travel between two consecutive timetabled stops.
///
/// `scheduled` is the timetable delta (already clamped positive by the
/// caller); variance scales with congestion at the stop being departed.
pub fn travel_minutes(rng: &mut SimRng, scheduled: f64, departed_congestion: u32) -> f64 {
    let std_dev = 4.0 * (departed_congestion as f64 / 10.0).ceil();
    sample_duration(rng, scheduled, std_dev)
}

/// Minutes for one group to traverse a walking leg.
///
/// The base walk is uniform in 5–20 minutes, scaled by the link's congestion
/// factor and by how many people are concurrently walking the same leg.
pub fn walk_minutes(rng: &mut SimRng, congestion_factor: f64, walkers: u32) -> f64 {
    let crowding = walkers as f64 / 100.0;
    let multiplier = congestion_factor * (1.0 + crowding);
    let expected = rng.gen_range(5.0..20.0) * multiplier;
    let std_dev = expected / 3.0 * crowding;
    sample_duration(rng, expected, std_dev)
}
