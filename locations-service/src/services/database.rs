//! Database service for locations-service.

use crate::models::{LocationRow, LocationView};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Columns the locations query depends on. Validated against the live
/// database once at startup so renames fail the process, not a request.
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("demographics", "zip_code"),
    ("demographics", "latitude"),
    ("demographics", "longitude"),
    ("demographics", "count_of_licensees"),
    ("population", "zip_code"),
    ("population", "population_under_18_years"),
    ("population", "population_density_per_sq_mile"),
];

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new connection pool and validate the expected schema.
    ///
    /// Fails fast when the database is unreachable or a required column is
    /// missing; the process must not serve traffic in either case.
    #[instrument(skip(database_url), fields(service = "locations-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        let db = Self { pool };
        db.validate_schema().await?;
        Ok(db)
    }

    /// Wrap an existing pool without validating the schema. Used by tests
    /// that drive the router against a lazily-connected pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Verify that every column the query depends on exists.
    #[instrument(skip(self))]
    pub async fn validate_schema(&self) -> Result<(), AppError> {
        let present: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT table_name::text, column_name::text
            FROM information_schema.columns
            WHERE table_schema = 'public'
              AND table_name IN ('demographics', 'population')
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to inspect schema: {}", e))
        })?;

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|(table, column)| {
                !present.iter().any(|(t, c)| t == table && c == column)
            })
            .map(|(table, column)| format!("{}.{}", table, column))
            .collect();

        if !missing.is_empty() {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Schema validation failed; missing columns: {}",
                missing.join(", ")
            )));
        }

        info!("Schema validated");
        Ok(())
    }

    /// Fetch all joined locations passing the density filter.
    ///
    /// Each call checks a connection out of the pool for the duration of
    /// the query only; it is returned on every exit path. Result order is
    /// whatever the join produces and is not part of the contract.
    #[instrument(skip(self))]
    pub async fn get_locations(&self) -> Result<Vec<LocationView>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_locations"])
            .start_timer();

        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT d.latitude, d.longitude, d.count_of_licensees,
                   p.population_under_18_years, p.population_density_per_sq_mile
            FROM demographics d
            INNER JOIN population p ON d.zip_code = p.zip_code
            WHERE p.population_density_per_sq_mile IS NOT NULL
              AND p.population_density_per_sq_mile > 0
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch locations: {}", e))
        })?;

        timer.observe_duration();

        Ok(rows.into_iter().map(LocationView::from).collect())
    }
}
