//! Route metrics: total distance/time for an ordered stop sequence, and the
//! marginal cost of appending one more stop — the primitives seeders and
//! crossover use to greedily place passengers.

use itertools::Itertools;

use crate::domain::types::Coordinate;
use crate::geo::distance_km;

/// Total distance (km) and time (min) for `start -> stops[0] -> ... -> stops[n-1] -> destination`.
///
/// Returns `(0.0, 0.0)` for an empty stop list — an unused vehicle contributes
/// nothing to the route totals.
pub fn compute_route(
    start: Coordinate,
    stops: &[Coordinate],
    destination: Coordinate,
    assumed_speed_kph: f64,
) -> (f64, f64) {
    if stops.is_empty() {
        return (0.0, 0.0);
    }

    let mut total = distance_km(
        start.latitude,
        start.longitude,
        stops[0].latitude,
        stops[0].longitude,
    );
    for (a, b) in stops.iter().tuple_windows() {
        total += distance_km(a.latitude, a.longitude, b.latitude, b.longitude);
    }
    let last = *stops.last().unwrap();
    total += distance_km(
        last.latitude,
        last.longitude,
        destination.latitude,
        destination.longitude,
    );

    let time_minutes = total / assumed_speed_kph * 60.0;
    (total, time_minutes)
}

/// Change in route length if `candidate` is appended after the current last
/// stop (or as the sole stop, if `stops` is empty). Used by seeders and
/// crossover to greedily place spill-over passengers without recomputing the
/// whole route.
pub fn additional_distance(
    start: Coordinate,
    stops: &[Coordinate],
    candidate: Coordinate,
    destination: Coordinate,
) -> f64 {
    match stops.last() {
        None => {
            distance_km(
                start.latitude,
                start.longitude,
                candidate.latitude,
                candidate.longitude,
            ) + distance_km(
                candidate.latitude,
                candidate.longitude,
                destination.latitude,
                destination.longitude,
            )
        }
        Some(last) => {
            let last_to_candidate = distance_km(
                last.latitude,
                last.longitude,
                candidate.latitude,
                candidate.longitude,
            );
            let candidate_to_dest = distance_km(
                candidate.latitude,
                candidate.longitude,
                destination.latitude,
                destination.longitude,
            );
            let last_to_dest = distance_km(
                last.latitude,
                last.longitude,
                destination.latitude,
                destination.longitude,
            );
            last_to_candidate + candidate_to_dest - last_to_dest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEST: Coordinate = Coordinate {
        latitude: 32.0741,
        longitude: 34.7922,
    };

    #[test]
    fn empty_stops_yield_zero_route() {
        let start = Coordinate::new(32.08, 34.80);
        assert_eq!(compute_route(start, &[], DEST, 30.0), (0.0, 0.0));
    }

    #[test]
    fn single_stop_matches_trivial_scenario() {
        let start = Coordinate::new(32.0800, 34.8000);
        let p1 = Coordinate::new(32.0750, 34.7950);
        let (distance, time) = compute_route(start, &[p1], DEST, 30.0);
        assert!((distance - 0.94).abs() < 0.1, "got {distance}");
        assert!((time - distance * 2.0).abs() < 1e-9);
    }

    #[test]
    fn additional_distance_empty_stops_is_full_leg() {
        let start = Coordinate::new(32.08, 34.80);
        let candidate = Coordinate::new(32.075, 34.795);
        let expected = distance_km(32.08, 34.80, 32.075, 34.795)
            + distance_km(32.075, 34.795, DEST.latitude, DEST.longitude);
        assert!((additional_distance(start, &[], candidate, DEST) - expected).abs() < 1e-9);
    }

    #[test]
    fn additional_distance_nonempty_uses_last_stop() {
        let start = Coordinate::new(32.08, 34.80);
        let stops = vec![Coordinate::new(32.078, 34.798)];
        let candidate = Coordinate::new(32.076, 34.796);
        let last = stops[0];
        let expected = distance_km(last.latitude, last.longitude, candidate.latitude, candidate.longitude)
            + distance_km(candidate.latitude, candidate.longitude, DEST.latitude, DEST.longitude)
            - distance_km(last.latitude, last.longitude, DEST.latitude, DEST.longitude);
        assert!((additional_distance(start, &stops, candidate, DEST) - expected).abs() < 1e-9);
    }

    #[test]
    fn time_is_derived_from_distance_and_speed() {
        let start = Coordinate::new(0.0, 0.0);
        let stops = vec![Coordinate::new(0.1, 0.1), Coordinate::new(0.2, 0.2)];
        let (distance, time) = compute_route(start, &stops, Coordinate::new(0.3, 0.3), 30.0);
        assert!((time - distance / 30.0 * 60.0).abs() < 1e-9);
    }
}
