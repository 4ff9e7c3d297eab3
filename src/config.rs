//! Algorithm parameters and the named constants they default from.

/// Default values for [`AlgorithmConfig`], mirrored as plain constants so the
/// rest of the crate (fixtures, tests, the binary entry point) can refer to
/// "the default tournament size" etc. without constructing a config first.
pub mod defaults {
    pub const POPULATION_SIZE: usize = 50;
    pub const MUTATION_RATE: f64 = 0.30;
    pub const ELITISM_RATE: f64 = 0.20;
    pub const TOURNAMENT_SIZE: usize = 5;
    pub const MAX_STAGNANT_GENERATIONS: usize = 20;
    pub const ASSUMED_SPEED_KPH: f64 = 30.0;
}

/// Tunable parameters for one [`crate::ga::Ga`] run.
///
/// `max_generations` has no default: it is a hard upper bound the caller
/// must supply for every run (see §4.F of the design — there is no sane
/// crate-wide default for "how long to search").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmConfig {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub elitism_rate: f64,
    pub tournament_size: usize,
    pub max_stagnant_generations: usize,
    pub max_generations: usize,
    pub assumed_speed_kph: f64,
}

impl AlgorithmConfig {
    /// Builds a config from `max_generations` and crate defaults for
    /// everything else.
    pub fn with_max_generations(max_generations: usize) -> Self {
        Self {
            max_generations,
            ..Self::default()
        }
    }

    /// `population_size` is always clamped to at least `defaults::POPULATION_SIZE`,
    /// per the "max(user_value, 50)" rule.
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(defaults::POPULATION_SIZE);
        self
    }

    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    pub fn tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    pub fn max_stagnant_generations(mut self, generations: usize) -> Self {
        self.max_stagnant_generations = generations;
        self
    }

    pub fn assumed_speed_kph(mut self, speed: f64) -> Self {
        self.assumed_speed_kph = speed;
        self
    }

    /// Number of elites carried verbatim into the next generation.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64) * self.elitism_rate).floor() as usize
    }
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            population_size: defaults::POPULATION_SIZE,
            mutation_rate: defaults::MUTATION_RATE,
            elitism_rate: defaults::ELITISM_RATE,
            tournament_size: defaults::TOURNAMENT_SIZE,
            max_stagnant_generations: defaults::MAX_STAGNANT_GENERATIONS,
            max_generations: 0,
            assumed_speed_kph: defaults::ASSUMED_SPEED_KPH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_named_constants() {
        let cfg = AlgorithmConfig::default();
        assert_eq!(cfg.population_size, defaults::POPULATION_SIZE);
        assert_eq!(cfg.mutation_rate, defaults::MUTATION_RATE);
        assert_eq!(cfg.elitism_rate, defaults::ELITISM_RATE);
    }

    #[test]
    fn population_size_is_clamped_up() {
        let cfg = AlgorithmConfig::default().population_size(5);
        assert_eq!(cfg.population_size, defaults::POPULATION_SIZE);

        let cfg = AlgorithmConfig::default().population_size(200);
        assert_eq!(cfg.population_size, 200);
    }

    #[test]
    fn elite_count_floors() {
        let cfg = AlgorithmConfig::default()
            .population_size(53)
            .elitism_rate(0.2);
        assert_eq!(cfg.elite_count(), 10);
    }
}
