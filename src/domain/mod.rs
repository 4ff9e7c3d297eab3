pub mod solution;
pub mod types;

pub use solution::{Solution, VehicleAssignment};
pub use types::{Coordinate, Passenger, ProblemInput, Vehicle};
