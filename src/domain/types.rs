use crate::config::AlgorithmConfig;

/// A latitude/longitude pair. Immutable, `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        crate::geo::valid_location(self.latitude, self.longitude)
    }
}

/// A passenger available for tomorrow's commute. Immutable within a GA run.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub id: u64,
    pub location: Coordinate,
    /// Display name, carried for logging only — never consulted by scoring.
    pub name: Option<String>,
}

impl Passenger {
    pub fn new(id: u64, location: Coordinate) -> Self {
        Self {
            id,
            location,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A driver's vehicle: start location and seat capacity. Immutable inputs
/// during a run — the mutable per-run state (assignment order, totals) lives
/// on [`crate::domain::solution::VehicleAssignment`], not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: u64,
    pub start: Coordinate,
    pub capacity: usize,
    pub driver_name: Option<String>,
}

impl Vehicle {
    pub fn new(id: u64, start: Coordinate, capacity: usize) -> Self {
        assert!(capacity >= 1, "vehicle capacity must be at least 1");
        Self {
            id,
            start,
            capacity,
            driver_name: None,
        }
    }

    pub fn with_driver_name(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }
}

/// Immutable inputs to one GA run: the passenger roster, the vehicle fleet,
/// the shared destination, the target arrival time, and algorithm parameters.
#[derive(Debug, Clone)]
pub struct ProblemInput {
    pub passengers: Vec<Passenger>,
    pub vehicles: Vec<Vehicle>,
    pub destination: Coordinate,
    /// Target arrival time, minutes past midnight. Stored for the caller;
    /// not consumed by the evaluator (see SPEC_FULL.md §9 open question).
    pub target_arrival_minutes: u32,
    pub config: AlgorithmConfig,
}

impl ProblemInput {
    pub fn new(
        passengers: Vec<Passenger>,
        vehicles: Vec<Vehicle>,
        destination: Coordinate,
        target_arrival_minutes: u32,
        config: AlgorithmConfig,
    ) -> Self {
        Self {
            passengers,
            vehicles,
            destination,
            target_arrival_minutes,
            config,
        }
    }

    pub fn total_capacity(&self) -> usize {
        self.vehicles.iter().map(|v| v.capacity).sum()
    }

    pub fn passenger_by_id(&self, id: u64) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }

    pub fn has_capacity_shortage(&self) -> bool {
        self.total_capacity() < self.passengers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_capacity_sums_vehicles() {
        let vehicles = vec![
            Vehicle::new(1, Coordinate::new(0.0, 0.0), 3),
            Vehicle::new(2, Coordinate::new(0.0, 0.0), 4),
        ];
        let input = ProblemInput::new(
            vec![],
            vehicles,
            Coordinate::new(0.0, 0.0),
            480,
            AlgorithmConfig::default(),
        );
        assert_eq!(input.total_capacity(), 7);
    }

    #[test]
    fn detects_capacity_shortage() {
        let vehicles = vec![Vehicle::new(1, Coordinate::new(0.0, 0.0), 2)];
        let passengers = (0..3)
            .map(|id| Passenger::new(id, Coordinate::new(0.0, 0.0)))
            .collect();
        let input = ProblemInput::new(
            passengers,
            vehicles,
            Coordinate::new(0.0, 0.0),
            480,
            AlgorithmConfig::default(),
        );
        assert!(input.has_capacity_shortage());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn zero_capacity_vehicle_panics() {
        Vehicle::new(1, Coordinate::new(0.0, 0.0), 0);
    }
}
