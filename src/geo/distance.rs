use super::types::GeoPoint;

/// Mean Earth radius used by every distance computation in the system.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine formula).
///
/// Symmetric, zero for identical points and finite for any finite input.
/// The haversine term is clamped to `[0, 1]`: rounding can push it slightly
/// above 1.0 for antipodal points, where `asin` would return NaN.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}
