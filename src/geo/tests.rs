//! Geo Module Tests
//!
//! ## Test Scopes
//! - **Distance**: Known city pairs, identity, symmetry and antipodal stability.
//! - **Validation**: Range boundaries and the `(0, 0)` sentinel.

#[cfg(test)]
mod tests {
    use crate::geo::{
        EARTH_RADIUS_KM, GeoError, GeoPoint, distance_km, in_range, is_valid_location,
        validate_range,
    };

    const ISTANBUL: GeoPoint = GeoPoint::new(41.0082, 28.9784);
    const ANKARA: GeoPoint = GeoPoint::new(39.9334, 32.8597);

    // ============================================================
    // DISTANCE TESTS
    // ============================================================

    #[test]
    fn test_distance_istanbul_to_ankara() {
        let d = distance_km(ISTANBUL, ANKARA);
        assert!((d - 350.0).abs() < 10.0, "Istanbul-Ankara should be ~350 km, got {}", d);
    }

    #[test]
    fn test_distance_short_hop() {
        let d = distance_km(ISTANBUL, GeoPoint::new(41.0182, 28.9884));
        assert!((d - 1.4).abs() <= 0.2, "Expected ~1.4 km, got {}", d);
    }

    #[test]
    fn test_distance_same_point_is_exactly_zero() {
        let points = [
            ISTANBUL,
            ANKARA,
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(90.0, 180.0),
            GeoPoint::new(-90.0, -180.0),
            GeoPoint::new(-33.8688, 151.2093),
        ];

        for p in points {
            assert_eq!(distance_km(p, p), 0.0, "distance({:?}, itself) must be 0", p);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (ISTANBUL, ANKARA),
            (GeoPoint::new(51.5074, -0.1278), GeoPoint::new(40.7128, -74.0060)),
            (GeoPoint::new(-89.9, 10.0), GeoPoint::new(89.9, -170.0)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
        ];

        for (a, b) in pairs {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            let tolerance = 1e-9 * ab.abs().max(1.0);
            assert!((ab - ba).abs() <= tolerance, "{} vs {}", ab, ba);
        }
    }

    #[test]
    fn test_distance_antipodal_is_finite() {
        let pairs = [
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0)),
            (GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0)),
            (GeoPoint::new(41.0082, 28.9784), GeoPoint::new(-41.0082, -151.0216)),
            (GeoPoint::new(0.0, -180.0), GeoPoint::new(0.0, 180.0)),
        ];

        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        for (a, b) in pairs {
            let d = distance_km(a, b);
            assert!(d.is_finite(), "distance({:?}, {:?}) must be finite", a, b);
            assert!(d <= half_circumference + 1e-6);
        }
    }

    #[test]
    fn test_distance_half_circumference_for_opposite_equator_points() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_distance_never_nan_on_grid() {
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                let p = GeoPoint::new(lat, lon);
                let antipode_lon = if lon > 0.0 { lon - 180.0 } else { lon + 180.0 };
                let antipode = GeoPoint::new(-lat, antipode_lon);
                assert!(distance_km(p, antipode).is_finite());
                assert!(distance_km(ISTANBUL, p).is_finite());
                lon += 45.0;
            }
            lat += 15.0;
        }
    }

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_origin_is_not_a_valid_location() {
        assert!(!is_valid_location(GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn test_near_origin_is_valid() {
        assert!(is_valid_location(GeoPoint::new(0.0, 0.0001)));
        assert!(is_valid_location(GeoPoint::new(-0.0001, 0.0)));
        assert!(is_valid_location(GeoPoint::new(0.0, 5.0)));
    }

    #[test]
    fn test_boundaries_are_valid() {
        assert!(is_valid_location(GeoPoint::new(90.0, 180.0)));
        assert!(is_valid_location(GeoPoint::new(-90.0, -180.0)));
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        assert!(!is_valid_location(GeoPoint::new(91.0, 0.0)));
        assert!(!is_valid_location(GeoPoint::new(0.0, 181.0)));
        assert!(!is_valid_location(GeoPoint::new(-90.5, 10.0)));
        assert!(!is_valid_location(GeoPoint::new(10.0, -180.5)));
        assert!(!is_valid_location(GeoPoint::new(f64::NAN, 10.0)));
    }

    #[test]
    fn test_in_range_allows_origin() {
        // The sentinel rule only applies to stored candidates
        assert!(in_range(GeoPoint::new(0.0, 0.0)));
        assert!(!in_range(GeoPoint::new(0.0, 200.0)));
    }

    #[test]
    fn test_validate_range_reports_coordinate() {
        assert_eq!(validate_range(ISTANBUL), Ok(()));
        assert_eq!(
            validate_range(GeoPoint::new(95.0, 0.0)),
            Err(GeoError::LatitudeOutOfRange)
        );
        assert_eq!(
            validate_range(GeoPoint::new(0.0, -190.0)),
            Err(GeoError::LongitudeOutOfRange)
        );
        assert_eq!(
            GeoError::LatitudeOutOfRange.to_string(),
            "latitude must be between -90 and 90"
        );
    }

    #[test]
    fn test_geo_point_serialization() {
        let json = serde_json::to_string(&ISTANBUL).unwrap();
        assert_eq!(json, r#"{"lat":41.0082,"lon":28.9784}"#);

        let restored: GeoPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ISTANBUL);
    }
}
