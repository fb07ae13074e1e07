//! Database service for coverage-service.

use crate::models::{CoverageRow, CoverageView};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Columns the coverage query depends on. Validated against the live
/// database once at startup so renames fail the process, not a request.
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("demographics", "latitude"),
    ("demographics", "longitude"),
    ("demographics", "count_of_licensees"),
    ("demographics", "coverage_rate"),
];

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new connection pool and validate the expected schema.
    #[instrument(skip(database_url), fields(service = "coverage-service"))]
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
              AND table_name = 'demographics'
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

    /// Fetch all demographics rows passing the coverage filter.
    ///
    /// Rows with a null or zero coverage rate, or without any licensed
    /// practitioners, are excluded; surviving fields are passed through
    /// unmodified. Result order is unspecified.
    #[instrument(skip(self))]
    pub async fn get_locations(&self) -> Result<Vec<CoverageView>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_locations"])
            .start_timer();

        let rows = sqlx::query_as::<_, CoverageRow>(
            r#"
            SELECT latitude, longitude, count_of_licensees, coverage_rate
            FROM demographics
            WHERE coverage_rate IS NOT NULL
              AND coverage_rate <> 0
              AND count_of_licensees > 0
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch locations: {}", e))
        })?;

        timer.observe_duration();

        Ok(rows.into_iter().map(CoverageView::from).collect())
    }
}
