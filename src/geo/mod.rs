//! Geographic Primitives Module
//!
//! Pure, stateless building blocks for proximity search.
//!
//! ## Core Concepts
//! - **GeoPoint**: An immutable latitude/longitude pair in degrees.
//! - **Distance**: Great-circle distance on a spherical Earth (haversine, R = 6371 km).
//! - **Validation**: Deciding whether a stored point can take part in distance ranking.
//!   The exact origin `(0, 0)` is the "location never recorded" sentinel and is never ranked.

pub mod distance;
pub mod types;
pub mod validation;

pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use types::GeoPoint;
pub use validation::{GeoError, in_range, is_valid_location, validate_range};

#[cfg(test)]
mod tests;
