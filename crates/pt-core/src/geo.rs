//! Geographic coordinate type.
//!
//! Positions are carried through to the output report for the frontend map;
//! the simulator itself never derives travel times from geometry (walk and
//! travel durations are stochastic estimates), so no distance math lives here.

/// A WGS-84 geographic coordinate stored as single-precision floats.
///
/// `f32` gives ~1 m precision at the equator — plenty for plotting stations
/// and route shapes at city scale.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
