//! Maps a candidate [`Solution`] to a scalar fitness score.
//!
//! Higher is better. The relative ordering of the weights below is load
//! bearing (unassigned passengers dominate, then overload, then assignment
//! count, then vehicle-count reduction, then raw distance/time) — see
//! SPEC_FULL.md §4.C. The absolute constants are tunable.

use crate::domain::solution::Solution;
use crate::domain::types::ProblemInput;
use crate::route::compute_route;

const DISTANCE_WEIGHT: f64 = 1000.0;
const ASSIGNMENT_WEIGHT: f64 = 100.0;
const VEHICLE_UTILIZATION_WEIGHT: f64 = -10.0;
const OVERLOAD_WEIGHT: f64 = -200.0;
const TIME_WEIGHT: f64 = 500.0;
const UNASSIGNED_WEIGHT: f64 = -1000.0;

/// Recomputes each vehicle's route totals from its current passenger order,
/// scores the solution, writes the score back onto it, and returns it.
pub fn evaluate(solution: &mut Solution, problem: &ProblemInput) -> f64 {
    let mut total_distance = 0.0;
    let mut max_time = 0.0_f64;

    for vehicle in &mut solution.vehicles {
        if vehicle.passengers.is_empty() {
            vehicle.total_distance_km = 0.0;
            vehicle.total_time_minutes = 0.0;
            continue;
        }

        let start = problem
            .vehicles
            .iter()
            .find(|v| v.id == vehicle.vehicle_id)
            .expect("assignment references an unknown vehicle")
            .start;

        let stops: Vec<_> = vehicle
            .passengers
            .iter()
            .map(|id| {
                problem
                    .passenger_by_id(*id)
                    .expect("assignment references an unknown passenger")
                    .location
            })
            .collect();

        let (distance, time) =
            compute_route(start, &stops, problem.destination, problem.config.assumed_speed_kph);
        vehicle.total_distance_km = distance;
        vehicle.total_time_minutes = time;

        total_distance += distance;
        max_time = max_time.max(time);
    }

    let assigned_count = solution.assigned_count();
    let used_vehicles = solution.used_vehicle_count();
    let overloaded_vehicles = solution.overloaded_vehicle_count();
    let total_passengers = problem.passengers.len();

    let distance_term = if total_distance > 0.0 {
        DISTANCE_WEIGHT / total_distance
    } else {
        0.0
    };
    let assignment_term = assigned_count as f64 * ASSIGNMENT_WEIGHT;
    let vehicle_utilization_term = used_vehicles as f64 * VEHICLE_UTILIZATION_WEIGHT;
    let overload_penalty = overloaded_vehicles as f64 * OVERLOAD_WEIGHT;
    let time_term = if max_time > 0.0 { TIME_WEIGHT / max_time } else { 0.0 };
    let unassigned_penalty = (total_passengers.saturating_sub(assigned_count)) as f64 * UNASSIGNED_WEIGHT;

    let score = distance_term
        + assignment_term
        + vehicle_utilization_term
        + overload_penalty
        + time_term
        + unassigned_penalty;

    solution.score = score;
    score
}
