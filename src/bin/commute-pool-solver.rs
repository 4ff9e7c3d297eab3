use std::error::Error;

use colored::Colorize;
use commute_pool::collaborators::storage::{RunStore, SqliteRunStore};
use commute_pool::config::AlgorithmConfig;
use commute_pool::fixtures::synthetic_problem;
use commute_pool::ga::Ga;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const N_PASSENGERS: usize = 40;
const N_VEHICLES: usize = 6;
const SEED: u64 = 67;
const MAX_GENERATIONS: usize = 300;

#[tokio::main]
#[tracing::instrument(name = "commute-pool solver", level = "info")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE))
        .init();

    dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:commute_pool.sqlite".to_string());
    let store = SqliteRunStore::connect(&database_url).await?;

    info!(
        "Starting commute-pool solver with {} passengers and {} vehicles",
        N_PASSENGERS, N_VEHICLES
    );

    let config = AlgorithmConfig::with_max_generations(MAX_GENERATIONS);
    let mut problem = synthetic_problem(N_PASSENGERS, N_VEHICLES, SEED);
    problem.config = config;

    let mut ga = Ga::new(problem.clone(), SEED);
    let solution = ga.solve(config.max_generations, None).clone();

    print_solution(&solution);
    if ga.has_capacity_issue() {
        println!(
            "{}",
            "WARNING: fleet capacity is insufficient for all passengers".yellow()
        );
    }

    store.save(&problem, &solution).await?;
    info!("Run persisted");

    Ok(())
}

fn print_solution(solution: &commute_pool::Solution) {
    println!(
        "{}",
        format!("Score: {:.2}", solution.score).green().bold()
    );
    for vehicle in &solution.vehicles {
        if vehicle.passengers.is_empty() {
            continue;
        }
        let line = format!(
            "vehicle {}: {:?} ({:.2} km, {:.1} min)",
            vehicle.vehicle_id, vehicle.passengers, vehicle.total_distance_km, vehicle.total_time_minutes
        );
        if vehicle.is_overloaded() {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}
