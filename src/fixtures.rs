//! Synthetic problem generation for local smoke runs and property tests, plus
//! an optional CSV-backed passenger loader for manual testing.

use csv::ReaderBuilder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::AlgorithmConfig;
use crate::domain::types::{Coordinate, Passenger, ProblemInput, Vehicle};

/// How far (degrees) passengers/vehicle starts are scattered from the
/// destination. ~0.1 degree is a few km at mid-latitudes — enough spread for
/// a non-trivial route without coordinates drifting out of range.
const SCATTER_DEGREES: f64 = 0.15;
const DEFAULT_VEHICLE_CAPACITY: usize = 4;

/// Deterministically generates `n_passengers` passengers and `n_vehicles`
/// vehicles scattered around a fixed destination, seeded by `seed`.
pub fn synthetic_problem(n_passengers: usize, n_vehicles: usize, seed: u64) -> ProblemInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let destination = Coordinate::new(32.0741, 34.7922);

    let passengers = (0..n_passengers)
        .map(|i| Passenger::new(i as u64, scattered_point(&mut rng, destination)))
        .collect();

    let vehicles = (0..n_vehicles)
        .map(|i| Vehicle::new(i as u64, scattered_point(&mut rng, destination), DEFAULT_VEHICLE_CAPACITY))
        .collect();

    info!(
        n_passengers,
        n_vehicles, seed, "generated synthetic problem instance"
    );

    ProblemInput::new(passengers, vehicles, destination, 480, AlgorithmConfig::default())
}

fn scattered_point<R: Rng>(rng: &mut R, center: Coordinate) -> Coordinate {
    let dlat = rng.gen_range(-SCATTER_DEGREES..SCATTER_DEGREES);
    let dlon = rng.gen_range(-SCATTER_DEGREES..SCATTER_DEGREES);
    Coordinate::new(center.latitude + dlat, center.longitude + dlon)
}

/// Reads `id,lat,lon` rows from `csv_path`, tolerating a header row (detected
/// the same way as the teacher's customer-postal reader: the first row is a
/// header if its first field isn't all-digit).
pub fn load_passengers_from_csv(csv_path: &str) -> Result<Vec<Passenger>, Box<dyn std::error::Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(csv_path)?;

    let mut passengers = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let record = row?;
        let Some(raw_id) = record.get(0) else { continue };
        if idx == 0 && !raw_id.trim().chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let id: u64 = raw_id.trim().parse()?;
        let lat: f64 = record.get(1).ok_or("missing latitude column")?.trim().parse()?;
        let lon: f64 = record.get(2).ok_or("missing longitude column")?.trim().parse()?;
        let location = Coordinate::new(lat, lon);
        if !location.is_valid() {
            warn!(id, lat, lon, "skipping passenger with out-of-range coordinates");
            continue;
        }
        passengers.push(Passenger::new(id, location));
    }

    info!(count = passengers.len(), csv_path, "loaded passengers from CSV");
    Ok(passengers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_problem_has_requested_sizes() {
        let problem = synthetic_problem(12, 3, 42);
        assert_eq!(problem.passengers.len(), 12);
        assert_eq!(problem.vehicles.len(), 3);
    }

    #[test]
    fn synthetic_problem_is_deterministic_for_a_fixed_seed() {
        let a = synthetic_problem(8, 2, 7);
        let b = synthetic_problem(8, 2, 7);
        assert_eq!(a.passengers, b.passengers);
        assert_eq!(a.vehicles, b.vehicles);
    }

    #[test]
    fn synthetic_problem_coordinates_are_valid() {
        let problem = synthetic_problem(20, 4, 1);
        assert!(problem.passengers.iter().all(|p| p.location.is_valid()));
        assert!(problem.vehicles.iter().all(|v| v.start.is_valid()));
    }

    #[test]
    fn load_passengers_from_csv_reads_a_well_formed_file() {
        let mut file = tempfile_with_contents("id,lat,lon\n1,32.07,34.79\n2,32.08,34.80\n");
        let passengers = load_passengers_from_csv(file.as_path_str()).unwrap();
        assert_eq!(passengers.len(), 2);
        assert_eq!(passengers[0].id, 1);
        file.cleanup();
    }

    #[test]
    fn load_passengers_from_csv_tolerates_a_missing_header() {
        let mut file = tempfile_with_contents("1,32.07,34.79\n2,32.08,34.80\n");
        let passengers = load_passengers_from_csv(file.as_path_str()).unwrap();
        assert_eq!(passengers.len(), 2);
        file.cleanup();
    }

    struct ScratchFile {
        path: std::path::PathBuf,
    }

    impl ScratchFile {
        fn as_path_str(&self) -> &str {
            self.path.to_str().unwrap()
        }

        fn cleanup(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn tempfile_with_contents(contents: &str) -> ScratchFile {
        let path = std::env::temp_dir().join(format!(
            "commute-pool-fixtures-test-{}.csv",
            contents.len()
        ));
        std::fs::write(&path, contents).unwrap();
        ScratchFile { path }
    }
}
