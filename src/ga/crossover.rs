//! Order-preserving, vehicle-bucket crossover: the child's first `k`
//! vehicles inherit from `parent1`, the rest from `parent2`, and whatever is
//! left over after both passes is placed greedily by marginal distance.

use rand::Rng;

use crate::domain::solution::Solution;
use crate::domain::types::{Coordinate, ProblemInput};
use crate::evaluation::evaluate;
use crate::route::additional_distance;

fn stops_for(problem: &ProblemInput, solution: &Solution, vehicle_idx: usize) -> Vec<Coordinate> {
    solution.vehicles[vehicle_idx]
        .passengers
        .iter()
        .map(|id| problem.passenger_by_id(*id).unwrap().location)
        .collect()
}

fn additional_distance_for(
    problem: &ProblemInput,
    solution: &Solution,
    vehicle_idx: usize,
    candidate: Coordinate,
) -> f64 {
    additional_distance(
        problem.vehicles[vehicle_idx].start,
        &stops_for(problem, solution, vehicle_idx),
        candidate,
        problem.destination,
    )
}

/// Copies `source.vehicles[i].passengers` into `child.vehicles[i]` for each
/// `i` in `range`, skipping passengers already present in the child or that
/// would overflow the child vehicle's capacity.
fn copy_bucket_range(child: &mut Solution, source: &Solution, range: std::ops::Range<usize>) {
    for i in range {
        let candidates = source.vehicles[i].passengers.clone();
        for passenger_id in candidates {
            if child.is_assigned(passenger_id) {
                continue;
            }
            if child.vehicles[i].spare_capacity() > 0 {
                child.vehicles[i].passengers.push(passenger_id);
            }
        }
    }
}

/// Places every passenger absent from `child` into the vehicle with spare
/// capacity minimizing [`additional_distance`], falling back to the globally
/// closest vehicle (allowing overload) tiebroken by lowest current load.
fn place_unassigned(child: &mut Solution, problem: &ProblemInput) {
    for passenger in &problem.passengers {
        if child.is_assigned(passenger.id) {
            continue;
        }

        let mut best_with_capacity: Option<(usize, f64)> = None;
        let mut best_overall: Option<(usize, f64, usize)> = None;

        for idx in 0..child.vehicles.len() {
            let added = additional_distance_for(problem, child, idx, passenger.location);
            let load = child.vehicles[idx].passengers.len();

            if child.vehicles[idx].spare_capacity() > 0 {
                let replace = match best_with_capacity {
                    Some((_, best)) => added < best,
                    None => true,
                };
                if replace {
                    best_with_capacity = Some((idx, added));
                }
            }

            let replace_overall = match best_overall {
                Some((_, best_add, best_load)) => {
                    added < best_add || (added == best_add && load < best_load)
                }
                None => true,
            };
            if replace_overall {
                best_overall = Some((idx, added, load));
            }
        }

        let target = best_with_capacity
            .map(|(idx, _)| idx)
            .or_else(|| best_overall.map(|(idx, ..)| idx))
            .expect("at least one vehicle exists");
        child.vehicles[target].passengers.push(passenger.id);
    }
}

/// Produces a child solution by splitting the vehicle buckets between the
/// two parents at a uniformly random index and repairing whatever is left
/// unassigned.
pub fn crossover<R: Rng>(
    parent1: &Solution,
    parent2: &Solution,
    problem: &ProblemInput,
    rng: &mut R,
) -> Solution {
    let mut child = Solution::blank(problem);
    let n_vehicles = problem.vehicles.len();

    let split = if n_vehicles < 2 {
        n_vehicles
    } else {
        rng.gen_range(1..n_vehicles)
    };

    copy_bucket_range(&mut child, parent1, 0..split);
    copy_bucket_range(&mut child, parent2, split..n_vehicles);
    place_unassigned(&mut child, problem);

    evaluate(&mut child, problem);
    child
}
