//! Great-circle distance between lat/lng pairs.

/// Earth radius used for Haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two lat/lng points, in kilometers.
///
/// Pure, total, deterministic — callers are responsible for passing valid
/// coordinates (see [`valid_location`]); invalid ones silently produce a
/// distance rather than an error.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Whether `(lat, lon)` falls within valid Earth coordinate ranges.
pub fn valid_location(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(distance_km(32.0741, 34.7922, 32.0741, 34.7922), 0.0);
    }

    #[test]
    fn roughly_matches_known_distance() {
        // Tel Aviv to Jerusalem, ~54 km as the crow flies.
        let d = distance_km(32.0853, 34.7818, 31.7683, 35.2137);
        assert!((50.0..60.0).contains(&d), "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = distance_km(1.0, 1.0, 2.0, 2.0);
        let b = distance_km(2.0, 2.0, 1.0, 1.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn valid_location_rejects_out_of_range() {
        assert!(valid_location(0.0, 0.0));
        assert!(valid_location(-90.0, 180.0));
        assert!(!valid_location(90.1, 0.0));
        assert!(!valid_location(0.0, -180.1));
    }
}
