//! The steady-state GA main loop: elitism + offspring generation, best-so-far
//! tracking, and stagnation-based convergence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, span, warn, Level};

use crate::domain::solution::Solution;
use crate::domain::types::ProblemInput;
use crate::evaluation::evaluate;
use crate::ga::crossover::crossover;
use crate::ga::mutation::mutate;
use crate::ga::seeders::initial_population;
use crate::ga::selection::tournament_select;

/// Owns the problem, the random source, and the live population for one run.
/// A single `Ga` is meant to be used for exactly one `solve()` call — it is
/// not reset between runs.
pub struct Ga<R: rand::Rng> {
    problem: ProblemInput,
    rng: R,
    population: Vec<Solution>,
    best_solution: Solution,
    best_score: f64,
    stagnant_generations: usize,
    capacity_issue: bool,
}

impl Ga<ChaCha8Rng> {
    /// Builds a `Ga` seeded with `seed`, for reproducible runs (see
    /// SPEC_FULL.md §8 determinism property).
    pub fn new(problem: ProblemInput, seed: u64) -> Self {
        Self::with_rng(problem, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> Ga<R> {
    pub fn with_rng(problem: ProblemInput, rng: R) -> Self {
        let capacity_issue = problem.has_capacity_shortage();
        let best_solution = Solution::blank(&problem);
        Self {
            problem,
            rng,
            population: Vec::new(),
            best_solution,
            best_score: f64::NEG_INFINITY,
            stagnant_generations: 0,
            capacity_issue,
        }
    }

    pub fn has_capacity_issue(&self) -> bool {
        self.capacity_issue
    }

    pub fn best_solution(&self) -> &Solution {
        &self.best_solution
    }

    /// Runs up to `generations` iterations of the GA main loop, seeding the
    /// initial population from `initial_population` if given and non-empty,
    /// else from the built-in seeders (§4.D). Returns the best solution
    /// found; `has_capacity_issue()` reflects whether a feasible partition
    /// was reachable.
    pub fn solve(&mut self, generations: usize, initial_population_override: Option<Vec<Solution>>) -> &Solution {
        if self.problem.passengers.is_empty() || self.problem.vehicles.is_empty() {
            self.best_solution = Solution::blank(&self.problem);
            evaluate(&mut self.best_solution, &self.problem);
            self.best_score = self.best_solution.score;
            return &self.best_solution;
        }

        if self.capacity_issue {
            warn!(
                total_capacity = self.problem.total_capacity(),
                n_passengers = self.problem.passengers.len(),
                "vehicle capacity is insufficient for all passengers"
            );
        }

        let solve_span = span!(
            Level::INFO,
            "solve",
            generations,
            population_size = self.problem.config.population_size
        );
        let _guard = solve_span.enter();

        self.population = match initial_population_override {
            Some(population) if !population.is_empty() => population,
            _ => initial_population(&self.problem, &mut self.rng),
        };

        let initial_best_idx = self.argmax_index(&self.population);
        self.best_solution = self.population[initial_best_idx].clone();
        self.best_score = self.best_solution.score;
        self.stagnant_generations = 0;

        for generation in 0..generations {
            self.population = self.next_generation();

            let current_best_idx = self.argmax_index(&self.population);
            let current_best = &self.population[current_best_idx];

            let acceptable = !current_best.has_capacity_breach() || self.capacity_issue;
            if current_best.score > self.best_score && acceptable {
                self.best_solution = current_best.clone();
                self.best_score = current_best.score;
                self.stagnant_generations = 0;
                debug!(generation, best_score = self.best_score, "new best solution");
            } else {
                self.stagnant_generations += 1;
            }

            if self.stagnant_generations >= self.problem.config.max_stagnant_generations {
                info!(generation, "Converged after {} generations", generation + 1);
                break;
            }
        }

        evaluate(&mut self.best_solution, &self.problem);
        &self.best_solution
    }

    fn argmax_index(&self, population: &[Solution]) -> usize {
        population
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.score.total_cmp(&b.score))
            .map(|(idx, _)| idx)
            .expect("population is non-empty")
    }

    fn next_generation(&mut self) -> Vec<Solution> {
        let mut sorted_by_score: Vec<&Solution> = self.population.iter().collect();
        sorted_by_score.sort_by(|a, b| b.score.total_cmp(&a.score));

        let elite_count = self.problem.config.elite_count().min(sorted_by_score.len());
        let mut next: Vec<Solution> = sorted_by_score[..elite_count].iter().map(|s| (*s).clone()).collect();

        let population_size = self.problem.config.population_size;
        while next.len() < population_size {
            let parent1 = tournament_select(&self.population, self.problem.config.tournament_size, &mut self.rng);
            let parent2 = tournament_select(&self.population, self.problem.config.tournament_size, &mut self.rng);
            let mut child = crossover(&parent1, &parent2, &self.problem, &mut self.rng);
            if self.rng.gen_bool(self.problem.config.mutation_rate) {
                mutate(&mut child, &self.problem, &mut self.rng);
            }
            child.assert_no_duplicate_assignments();
            next.push(child);
        }

        next
    }
}


/// Property checks over randomized problem instances, complementing the
/// hand-picked scenarios above. Uses [`crate::fixtures::synthetic_problem`]
/// to generate instances across a range of sizes and seeds.
#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::config::AlgorithmConfig;
    use crate::fixtures::synthetic_problem;
    use crate::ga::seeders::initial_population;
    use crate::ga::Ga;

    fn instance(n_passengers: usize, n_vehicles: usize, instance_seed: u64) -> crate::ProblemInput {
        let mut problem = synthetic_problem(n_passengers, n_vehicles, instance_seed);
        problem.config = AlgorithmConfig::default();
        problem
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// No passenger is ever assigned to more than one vehicle, for any
        /// instance size and GA seed.
        #[test]
        fn solve_never_duplicates_a_passenger(
            n_passengers in 1_usize..20,
            n_vehicles in 1_usize..6,
            instance_seed in any::<u64>(),
            ga_seed in any::<u64>(),
        ) {
            let problem = instance(n_passengers, n_vehicles, instance_seed);
            let mut ga = Ga::new(problem, ga_seed);
            let solution = ga.solve(25, None);
            solution.assert_no_duplicate_assignments();

            let mut seen = std::collections::HashSet::new();
            for vehicle in &solution.vehicles {
                for &passenger_id in &vehicle.passengers {
                    prop_assert!(seen.insert(passenger_id), "passenger {} assigned twice", passenger_id);
                }
            }
        }

        /// Route totals are non-negative and time is exactly distance /
        /// assumed_speed_kph * 60.
        #[test]
        fn route_totals_are_consistent_with_speed(
            n_passengers in 1_usize..15,
            n_vehicles in 1_usize..5,
            instance_seed in any::<u64>(),
            ga_seed in any::<u64>(),
        ) {
            let problem = instance(n_passengers, n_vehicles, instance_seed);
            let speed = problem.config.assumed_speed_kph;
            let mut ga = Ga::new(problem, ga_seed);
            let solution = ga.solve(20, None);

            for vehicle in &solution.vehicles {
                prop_assert!(vehicle.total_distance_km >= 0.0);
                prop_assert!(vehicle.total_time_minutes >= 0.0);
                let expected_time = vehicle.total_distance_km / speed * 60.0;
                prop_assert!(
                    (vehicle.total_time_minutes - expected_time).abs() < 1e-6,
                    "time {} != distance/speed*60 = {}",
                    vehicle.total_time_minutes,
                    expected_time
                );
            }
        }

        /// A fixed GA seed and identical inputs produce byte-identical
        /// solutions across two independent runs.
        #[test]
        fn solve_is_deterministic_for_a_fixed_seed(
            n_passengers in 1_usize..15,
            n_vehicles in 1_usize..5,
            instance_seed in any::<u64>(),
            ga_seed in any::<u64>(),
        ) {
            let problem_a = instance(n_passengers, n_vehicles, instance_seed);
            let problem_b = instance(n_passengers, n_vehicles, instance_seed);

            let mut ga_a = Ga::new(problem_a, ga_seed);
            let mut ga_b = Ga::new(problem_b, ga_seed);
            let a = ga_a.solve(15, None).clone();
            let b = ga_b.solve(15, None).clone();
            prop_assert_eq!(a, b);
        }

        /// The solution solve() returns never scores below the best of the
        /// initial seeded population.
        #[test]
        fn solve_never_regresses_below_the_best_seed(
            n_passengers in 1_usize..15,
            n_vehicles in 1_usize..5,
            instance_seed in any::<u64>(),
            ga_seed in any::<u64>(),
        ) {
            let problem = instance(n_passengers, n_vehicles, instance_seed);
            let mut seed_rng = ChaCha8Rng::seed_from_u64(ga_seed);
            let seeds = initial_population(&problem, &mut seed_rng);
            let best_seed_score = seeds.iter().map(|s| s.score).fold(f64::NEG_INFINITY, f64::max);

            let mut ga = Ga::new(problem, ga_seed);
            let solution = ga.solve(30, None);
            prop_assert!(solution.score >= best_seed_score - 1e-9);
        }
    }
}
