//! The genetic algorithm core: seeding heuristics, variation operators, and
//! the steady-state driver loop that ties them together.

pub mod crossover;
pub mod driver;
pub mod mutation;
pub mod seeders;
pub mod selection;

pub use driver::Ga;
