use serde::{Deserialize, Serialize};

/// A point on the Earth's surface, in degrees.
///
/// Latitude is meaningful in `[-90, 90]` and longitude in `[-180, 180]`;
/// the type itself does not enforce the ranges, see `geo::validation`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
