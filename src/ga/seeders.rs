//! Initial-population heuristics: greedy-by-distance, even-distribution, and
//! randomized seeds. The first two are always included; the rest of the
//! population is filled with independent randomized seeds.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::solution::Solution;
use crate::domain::types::{Coordinate, ProblemInput};
use crate::evaluation::evaluate;
use crate::geo::distance_km;

fn dist(a: Coordinate, b: Coordinate) -> f64 {
    distance_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Index (into both `problem.vehicles` and `solution.vehicles`, which share
/// declaration order) of the vehicle with spare capacity closest to
/// `location`; falls back to the least-loaded vehicle if none has room.
fn place_in_nearest_or_least_loaded(
    solution: &mut Solution,
    problem: &ProblemInput,
    location: Coordinate,
    passenger_id: u64,
) {
    let mut nearest_with_capacity: Option<(usize, f64)> = None;
    let mut least_loaded: (usize, usize) = (0, usize::MAX);

    for (idx, assignment) in solution.vehicles.iter().enumerate() {
        let load = assignment.passengers.len();
        if load < least_loaded.1 {
            least_loaded = (idx, load);
        }
        if assignment.spare_capacity() > 0 {
            let d = dist(problem.vehicles[idx].start, location);
            let better = match nearest_with_capacity {
                Some((_, best)) => d < best,
                None => true,
            };
            if better {
                nearest_with_capacity = Some((idx, d));
            }
        }
    }

    let target = nearest_with_capacity.map(|(idx, _)| idx).unwrap_or(least_loaded.0);
    solution.vehicles[target].passengers.push(passenger_id);
}

/// Sort passengers by distance to destination (farthest first), then place
/// each in the nearest vehicle with spare capacity.
pub fn seed_greedy_by_distance(problem: &ProblemInput) -> Solution {
    let mut solution = Solution::blank(problem);
    let mut passengers: Vec<_> = problem.passengers.iter().collect();
    passengers.sort_by(|a, b| {
        dist(b.location, problem.destination)
            .total_cmp(&dist(a.location, problem.destination))
    });

    for passenger in passengers {
        place_in_nearest_or_least_loaded(&mut solution, problem, passenger.location, passenger.id);
    }

    evaluate(&mut solution, problem);
    solution
}

/// Each vehicle claims its `target` nearest remaining passengers in
/// declaration order, where `target` is bounded by the passenger count, the
/// per-vehicle share of total capacity, and the smallest vehicle's capacity.
/// Leftovers spill to the nearest vehicle with capacity, then the
/// least-loaded one.
pub fn seed_even_distribution(problem: &ProblemInput) -> Solution {
    let mut solution = Solution::blank(problem);
    if problem.vehicles.is_empty() {
        return solution;
    }

    let n_vehicles = problem.vehicles.len();
    let min_capacity = problem.vehicles.iter().map(|v| v.capacity).min().unwrap_or(0);
    let target = [
        problem.passengers.len() / n_vehicles,
        problem.total_capacity() / n_vehicles,
        min_capacity,
    ]
    .into_iter()
    .min()
    .unwrap_or(0);

    let mut remaining: Vec<_> = problem.passengers.iter().collect();

    for idx in 0..n_vehicles {
        let start = problem.vehicles[idx].start;
        remaining.sort_by(|a, b| dist(start, a.location).total_cmp(&dist(start, b.location)));
        let take = target.min(remaining.len());
        for passenger in remaining.drain(0..take) {
            solution.vehicles[idx].passengers.push(passenger.id);
        }
    }

    for passenger in remaining {
        place_in_nearest_or_least_loaded(&mut solution, problem, passenger.location, passenger.id);
    }

    evaluate(&mut solution, problem);
    solution
}

/// Shuffles passengers, walks vehicles in order claiming a random count from
/// the shuffled remainder (bounded by capacity), then spills any leftover to
/// the vehicle with fewest passengers, tiebreaking on lowest
/// [`crate::route::additional_distance`].
pub fn seed_randomized<R: Rng>(problem: &ProblemInput, rng: &mut R) -> Solution {
    let mut solution = Solution::blank(problem);
    if problem.vehicles.is_empty() {
        return solution;
    }

    let mut remaining: Vec<_> = problem.passengers.iter().collect();
    remaining.shuffle(rng);

    for idx in 0..problem.vehicles.len() {
        if remaining.is_empty() {
            break;
        }
        let capacity = problem.vehicles[idx].capacity;
        let bound = capacity.min(remaining.len());
        let count = if bound == 0 { 0 } else { rng.gen_range(0..=bound) };
        for passenger in remaining.drain(0..count) {
            solution.vehicles[idx].passengers.push(passenger.id);
        }
    }

    for passenger in remaining {
        let best_idx = (0..solution.vehicles.len())
            .min_by(|&a, &b| {
                let load_a = solution.vehicles[a].passengers.len();
                let load_b = solution.vehicles[b].passengers.len();
                load_a.cmp(&load_b).then_with(|| {
                    let add_a = additional_distance_for(problem, &solution, a, passenger.location);
                    let add_b = additional_distance_for(problem, &solution, b, passenger.location);
                    add_a.total_cmp(&add_b)
                })
            })
            .expect("solution has at least one vehicle");
        solution.vehicles[best_idx].passengers.push(passenger.id);
    }

    evaluate(&mut solution, problem);
    solution
}

fn additional_distance_for(
    problem: &ProblemInput,
    solution: &Solution,
    vehicle_idx: usize,
    candidate: Coordinate,
) -> f64 {
    let stops: Vec<_> = solution.vehicles[vehicle_idx]
        .passengers
        .iter()
        .map(|id| problem.passenger_by_id(*id).unwrap().location)
        .collect();
    crate::route::additional_distance(
        problem.vehicles[vehicle_idx].start,
        &stops,
        candidate,
        problem.destination,
    )
}

/// Builds the initial population: greedy-by-distance and even-distribution
/// seeds always included, topped up with independent randomized seeds until
/// `problem.config.population_size` candidates exist.
pub fn initial_population<R: Rng>(problem: &ProblemInput, rng: &mut R) -> Vec<Solution> {
    let mut population = vec![seed_greedy_by_distance(problem), seed_even_distribution(problem)];
    while population.len() < problem.config.population_size {
        population.push(seed_randomized(problem, rng));
    }
    population
}
