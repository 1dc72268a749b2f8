use super::types::GeoPoint;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

/// Range check only. NaN is out of range.
pub fn in_range(p: GeoPoint) -> bool {
    (-90.0..=90.0).contains(&p.lat) && (-180.0..=180.0).contains(&p.lon)
}

/// Same check as [`in_range`], reporting which coordinate is wrong.
pub fn validate_range(p: GeoPoint) -> Result<(), GeoError> {
    if !(-90.0..=90.0).contains(&p.lat) {
        return Err(GeoError::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&p.lon) {
        return Err(GeoError::LongitudeOutOfRange);
    }
    Ok(())
}

/// Whether a stored point may take part in distance ranking.
///
/// The exact origin is rejected: writers persist `(0, 0)` when no location
/// was ever supplied. Points merely close to the origin are valid.
pub fn is_valid_location(p: GeoPoint) -> bool {
    if p.lat == 0.0 && p.lon == 0.0 {
        return false;
    }
    in_range(p)
}
