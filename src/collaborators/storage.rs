//! Persists a finished run. Adapted from the teacher's `database::sqlx`
//! module — invoked once, after `solve()` returns, never during the GA loop.

use std::error::Error;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing::info;

use crate::domain::solution::Solution;
use crate::domain::types::ProblemInput;

pub trait RunStore: Send + Sync {
    fn save(
        &self,
        problem: &ProblemInput,
        solution: &Solution,
    ) -> impl std::future::Future<Output = Result<(), Box<dyn Error + Send + Sync>>> + Send;
}

/// Stores each run's winning solution as one row per vehicle assignment in a
/// SQLite database.
pub struct SqliteRunStore {
    pool: SqlitePool,
}

impl SqliteRunStore {
    pub async fn connect(database_url: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        info!("Connected to SQLite database at {database_url}");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS run_assignments (
                run_id TEXT NOT NULL,
                vehicle_id INTEGER NOT NULL,
                passenger_id INTEGER NOT NULL,
                stop_order INTEGER NOT NULL,
                total_distance_km REAL NOT NULL,
                total_time_minutes REAL NOT NULL,
                estimated_pickup_minute INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

impl RunStore for SqliteRunStore {
    async fn save(&self, problem: &ProblemInput, solution: &Solution) -> Result<(), Box<dyn Error + Send + Sync>> {
        let run_id = format!("run-{:x}", solution.score.to_bits());
        let created_at = Utc::now().timestamp();

        for vehicle in &solution.vehicles {
            let stop_count = vehicle.passengers.len();
            for (stop_order, passenger_id) in vehicle.passengers.iter().enumerate() {
                // Stops are evenly spaced over the vehicle's total travel time, counting
                // backward from the target arrival — a fixed per-leg estimate, not a
                // re-derivation of the actual route geometry.
                let legs_remaining = (stop_count - stop_order) as f64;
                let minutes_before_arrival =
                    vehicle.total_time_minutes * legs_remaining / stop_count as f64;
                let estimated_pickup_minute =
                    problem.target_arrival_minutes as i64 - minutes_before_arrival.round() as i64;

                sqlx::query(
                    r#"
                    INSERT INTO run_assignments
                        (run_id, vehicle_id, passenger_id, stop_order, total_distance_km,
                         total_time_minutes, estimated_pickup_minute, created_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&run_id)
                .bind(vehicle.vehicle_id as i64)
                .bind(*passenger_id as i64)
                .bind(stop_order as i64)
                .bind(vehicle.total_distance_km)
                .bind(vehicle.total_time_minutes)
                .bind(estimated_pickup_minute)
                .bind(created_at)
                .execute(&self.pool)
                .await?;
            }
        }
        info!(run_id, "persisted solution to SQLite");
        Ok(())
    }
}
