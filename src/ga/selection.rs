//! Tournament selection: sample `tournament_size` distinct competitors
//! uniformly and return a clone of the highest-scoring one.

use rand::seq::index::sample;
use rand::Rng;

use crate::domain::solution::Solution;

pub fn tournament_select<R: Rng>(
    population: &[Solution],
    tournament_size: usize,
    rng: &mut R,
) -> Solution {
    assert!(!population.is_empty(), "cannot select from an empty population");
    let k = tournament_size.min(population.len());
    let indices = sample(rng, population.len(), k);

    indices
        .into_iter()
        .map(|idx| &population[idx])
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .expect("tournament sample is non-empty")
        .clone()
}
