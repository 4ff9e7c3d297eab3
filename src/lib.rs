//! Batch ride-share route optimizer: assigns passengers to vehicles and
//! orders each vehicle's pickups, ending at a shared destination, via a
//! steady-state genetic algorithm.
//!
//! The [`ga`] module is the synchronous, allocation-light core — no I/O, no
//! async, safe to call from inside a `spawn_blocking` or a plain thread. The
//! [`collaborators`] module models the narrow boundary to everything around
//! it (distance lookups, persistence) as traits, so the core never depends on
//! a network or a database directly.

pub mod collaborators;
pub mod config;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod ga;
pub mod geo;
pub mod route;

pub use config::AlgorithmConfig;
pub use domain::{Coordinate, Passenger, ProblemInput, Solution, Vehicle, VehicleAssignment};
pub use ga::Ga;
