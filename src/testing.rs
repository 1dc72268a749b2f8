//! Shared fixtures for unit tests.

use crate::drivers::types::{Driver, TaxiType};
use crate::geo::GeoPoint;
use chrono::{TimeZone, Utc};

pub const ISTANBUL: GeoPoint = GeoPoint::new(41.0082, 28.9784);

pub fn driver_at(id: &str, taxi_type: TaxiType, lat: f64, lon: f64) -> Driver {
    let created_at = Utc.with_ymd_and_hms(2025, 12, 6, 1, 0, 0).unwrap();
    Driver {
        id: id.to_string(),
        first_name: format!("First-{}", id),
        last_name: format!("Last-{}", id),
        plate: "34ABC123".to_string(),
        taxi_type,
        car_brand: "Toyota".to_string(),
        car_model: "Corolla".to_string(),
        location: GeoPoint::new(lat, lon),
        created_at,
        updated_at: created_at,
    }
}
