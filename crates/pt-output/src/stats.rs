//! Wait-time statistics and bottleneck detection.
//!
//! A group's wait at a station is the gap between consecutive entries in its
//! visit log; its still-open final entry is closed at the end-of-simulation
//! wall minute.  A station is a bottleneck when its average wait is a
//! statistical outlier on the *slow* side: z-score above 1.0 and above the
//! population mean across all stations that observed at least one wait.

use pt_core::StationId;
use pt_model::World;

/// Z-score above which a slow station is flagged.
const BOTTLENECK_Z: f64 = 1.0;

/// Per-station average observed wait, indexed by station; `None` for
/// stations no group ever waited at.
pub fn average_waits(world: &World, horizon_wall: f64) -> Vec<Option<f64>> {
    let mut sums = vec![0.0_f64; world.stations.len()];
    let mut counts = vec![0_u32; world.stations.len()];

    for group in &world.groups {
        for (i, entry) in group.log.iter().enumerate() {
            let end = match group.log.get(i + 1) {
                Some(next) => next.at,
                None => horizon_wall,
            };
            let wait = end - entry.at;
            // A malformed or past-horizon entry yields a negative gap;
            // skip the record rather than poisoning the aggregate.
            if wait < 0.0 {
                continue;
            }
            sums[entry.station.index()] += wait;
            counts[entry.station.index()] += 1;
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, n)| if n == 0 { None } else { Some(sum / n as f64) })
        .collect()
}

/// Population mean and standard deviation.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Flag bottleneck stations given their average waits.
///
/// Returns one flag per station, aligned with the input.  When every
/// observed average is identical (std 0) nothing is flagged.
pub fn flag_bottlenecks(averages: &[Option<f64>]) -> Vec<bool> {
    let observed: Vec<f64> = averages.iter().flatten().copied().collect();
    if observed.is_empty() {
        return vec![false; averages.len()];
    }
    let (mean, std) = mean_std(&observed);
    if std <= f64::EPSILON {
        return vec![false; averages.len()];
    }
    averages
        .iter()
        .map(|avg| match avg {
            Some(a) => a > &mean && (a - mean) / std > BOTTLENECK_Z,
            None => false,
        })
        .collect()
}

/// Station ids whose flag is set, in station order.
pub fn bottleneck_ids(flags: &[bool]) -> Vec<StationId> {
    flags
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f)
        .map(|(i, _)| StationId(i as u32))
        .collect()
}
