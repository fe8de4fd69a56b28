//! Geographic coordinates and the distance metric used across the system.
//!
//! All control-flow decisions (assignment range, arrival detection, movement
//! steps) use [`Coordinate::manhattan_distance_km`]. The Euclidean variant is
//! kept for diagnostics only and must not feed any decision.

use serde::{Deserialize, Serialize};

/// Degrees-to-kilometers scale at the equator.
const KM_PER_DEGREE: f64 = 111.0;

/// Maximum courier-to-pickup distance for EXPRESS assignment, in km.
pub const EXPRESS_MAX_DISTANCE_KM: f64 = 5.0;

/// Distance below which a courier counts as having reached a target, in km.
pub const ARRIVAL_THRESHOLD_KM: f64 = 0.01;

/// A WGS84-ish point. No invariants beyond finiteness, which is checked at
/// the validation boundary, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Manhattan distance scaled to kilometers, rounded to two decimals.
    ///
    /// Deterministic and total: NaN/Infinity inputs propagate.
    pub fn manhattan_distance_km(&self, other: Coordinate) -> f64 {
        let lat_diff = (self.lat - other.lat).abs();
        let lng_diff = (self.lng - other.lng).abs();
        round_two((lat_diff + lng_diff) * KM_PER_DEGREE)
    }

    /// Euclidean distance scaled to kilometers, rounded to two decimals.
    /// Diagnostics only.
    pub fn euclidean_distance_km(&self, other: Coordinate) -> f64 {
        let lat_diff = self.lat - other.lat;
        let lng_diff = self.lng - other.lng;
        round_two((lat_diff * lat_diff + lng_diff * lng_diff).sqrt() * KM_PER_DEGREE)
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
