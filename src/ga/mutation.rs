//! Four mutation operators, chosen uniformly: swap, reorder (segment
//! reverse), move, and 2-opt local search. Each is a no-op if its
//! preconditions aren't met (e.g. swap needs two distinct non-empty
//! vehicles) — the caller always rescores afterwards, so a no-op mutation
//! simply leaves the score unchanged.

use rand::seq::index::sample;
use rand::Rng;

use crate::domain::solution::Solution;
use crate::domain::types::ProblemInput;
use crate::evaluation::evaluate;
use crate::route::compute_route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Swap,
    Reorder,
    Move,
    TwoOpt,
}

const KINDS: [MutationKind; 4] = [
    MutationKind::Swap,
    MutationKind::Reorder,
    MutationKind::Move,
    MutationKind::TwoOpt,
];

/// Applies one uniformly-chosen mutation kind to `solution` in place, then
/// rescores it.
pub fn mutate<R: Rng>(solution: &mut Solution, problem: &ProblemInput, rng: &mut R) {
    let kind = KINDS[rng.gen_range(0..KINDS.len())];
    match kind {
        MutationKind::Swap => swap(solution, rng),
        MutationKind::Reorder => reorder(solution, rng),
        MutationKind::Move => move_passenger(solution, rng),
        MutationKind::TwoOpt => two_opt(solution, problem, rng),
    }
    evaluate(solution, problem);
}

fn non_empty_vehicle_indices(solution: &Solution) -> Vec<usize> {
    (0..solution.vehicles.len())
        .filter(|&i| !solution.vehicles[i].passengers.is_empty())
        .collect()
}

/// Exchange one random passenger between two distinct non-empty vehicles, at
/// the same position index in each.
fn swap<R: Rng>(solution: &mut Solution, rng: &mut R) {
    let candidates = non_empty_vehicle_indices(solution);
    if candidates.len() < 2 {
        return;
    }
    let picked: Vec<usize> = sample(rng, candidates.len(), 2).into_iter().collect();
    let (a, b) = (candidates[picked[0]], candidates[picked[1]]);

    let pos_a = rng.gen_range(0..solution.vehicles[a].passengers.len());
    let pos_b = rng.gen_range(0..solution.vehicles[b].passengers.len());

    let tmp = solution.vehicles[a].passengers[pos_a];
    solution.vehicles[a].passengers[pos_a] = solution.vehicles[b].passengers[pos_b];
    solution.vehicles[b].passengers[pos_b] = tmp;
}

/// Reverse a random subrange of a vehicle's pickup order (or swap its two
/// stops with probability 1/2, if it has exactly two).
fn reorder<R: Rng>(solution: &mut Solution, rng: &mut R) {
    let candidates: Vec<usize> = (0..solution.vehicles.len())
        .filter(|&i| solution.vehicles[i].passengers.len() >= 2)
        .collect();
    if candidates.is_empty() {
        return;
    }
    let idx = candidates[rng.gen_range(0..candidates.len())];

    let len = solution.vehicles[idx].passengers.len();
    if len >= 3 {
        let picked: Vec<usize> = sample(rng, len, 2).into_iter().collect();
        let (mut i, mut j) = (picked[0], picked[1]);
        if i > j {
            std::mem::swap(&mut i, &mut j);
        }
        solution.vehicles[idx].passengers[i..=j].reverse();
    } else if len == 2 && rng.gen_bool(0.5) {
        solution.vehicles[idx].passengers.swap(0, 1);
    }
}

/// Move a random passenger from a non-empty vehicle to any other vehicle,
/// appended at the end. No capacity check — overload is penalized by the
/// evaluator, not prevented here.
fn move_passenger<R: Rng>(solution: &mut Solution, rng: &mut R) {
    let sources = non_empty_vehicle_indices(solution);
    if sources.is_empty() || solution.vehicles.len() < 2 {
        return;
    }
    let source = sources[rng.gen_range(0..sources.len())];
    let pos = rng.gen_range(0..solution.vehicles[source].passengers.len());

    let targets: Vec<usize> = (0..solution.vehicles.len()).filter(|&i| i != source).collect();
    let target = targets[rng.gen_range(0..targets.len())];

    let passenger_id = solution.vehicles[source].passengers.remove(pos);
    solution.vehicles[target].passengers.push(passenger_id);
}

/// Pick a vehicle with at least 4 stops and try up to
/// `min(10, n*(n-1)/2)` random position pairs, reversing the subrange
/// `[i, j]` and keeping the best strictly-improving reversal seen.
fn two_opt<R: Rng>(solution: &mut Solution, problem: &ProblemInput, rng: &mut R) {
    let candidates: Vec<usize> = (0..solution.vehicles.len())
        .filter(|&i| solution.vehicles[i].passengers.len() >= 4)
        .collect();
    if candidates.is_empty() {
        return;
    }
    let idx = candidates[rng.gen_range(0..candidates.len())];
    let vehicle_start = problem.vehicles[idx].start;
    let speed = problem.config.assumed_speed_kph;

    let route_distance = |order: &[u64]| -> f64 {
        let stops: Vec<_> = order
            .iter()
            .map(|id| problem.passenger_by_id(*id).unwrap().location)
            .collect();
        compute_route(vehicle_start, &stops, problem.destination, speed).0
    };

    let n = solution.vehicles[idx].passengers.len();
    let attempts = 10.min(n * (n - 1) / 2);
    let current_distance = route_distance(&solution.vehicles[idx].passengers);

    let mut best: Option<(usize, usize, f64)> = None;
    for _ in 0..attempts {
        let picked: Vec<usize> = sample(rng, n, 2).into_iter().collect();
        let (mut i, mut j) = (picked[0], picked[1]);
        if i > j {
            std::mem::swap(&mut i, &mut j);
        }
        if i == j {
            continue;
        }

        let mut candidate_order = solution.vehicles[idx].passengers.clone();
        candidate_order[i..=j].reverse();
        let distance = route_distance(&candidate_order);

        let better = match best {
            Some((.., best_distance)) => distance < best_distance,
            None => true,
        };
        if better {
            best = Some((i, j, distance));
        }
    }

    if let Some((i, j, distance)) = best {
        if distance < current_distance {
            solution.vehicles[idx].passengers[i..=j].reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlgorithmConfig;
    use crate::domain::types::{Coordinate, Passenger, Vehicle};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn problem_with_long_route() -> ProblemInput {
        let destination = Coordinate::new(0.0, 0.0);
        let vehicles = vec![Vehicle::new(1, Coordinate::new(0.0, 5.0), 10)];
        // Deliberately out of order so 2-opt has an improving move available.
        let passengers = vec![
            Passenger::new(1, Coordinate::new(0.0, 1.0)),
            Passenger::new(2, Coordinate::new(0.0, 4.0)),
            Passenger::new(3, Coordinate::new(0.0, 2.0)),
            Passenger::new(4, Coordinate::new(0.0, 3.0)),
        ];
        ProblemInput::new(passengers, vehicles, destination, 480, AlgorithmConfig::default())
    }

    #[test]
    fn mutation_preserves_the_assignment_invariant() {
        let problem = problem_with_long_route();
        let mut solution = crate::ga::seeders::seed_greedy_by_distance(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            mutate(&mut solution, &problem, &mut rng);
            solution.assert_no_duplicate_assignments();
        }
    }

    #[test]
    fn two_opt_never_worsens_the_mutated_vehicles_route() {
        let problem = problem_with_long_route();
        let mut solution = crate::ga::seeders::seed_greedy_by_distance(&problem);
        let before = solution.vehicle(1).unwrap().total_distance_km;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        two_opt(&mut solution, &problem, &mut rng);
        evaluate(&mut solution, &problem);
        let after = solution.vehicle(1).unwrap().total_distance_km;
        assert!(after <= before + 1e-9);
    }

    #[test]
    fn move_is_a_noop_with_a_single_vehicle() {
        let destination = Coordinate::new(0.0, 0.0);
        let vehicles = vec![Vehicle::new(1, Coordinate::new(0.0, 1.0), 5)];
        let passengers = vec![Passenger::new(1, Coordinate::new(0.0, 0.5))];
        let problem =
            ProblemInput::new(passengers, vehicles, destination, 480, AlgorithmConfig::default());
        let mut solution = crate::ga::seeders::seed_greedy_by_distance(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        move_passenger(&mut solution, &mut rng);
        assert_eq!(solution.assigned_count(), 1);
    }
}
