use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl CoverageConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(CoverageConfig {
            common,
            database: DatabaseConfig {
                // No default: a missing connection string is startup-fatal.
                url: get_env("DATABASE_URL", None)?,
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("5"))?
                    .parse()
                    .unwrap_or(5),
                min_connections: get_env("DATABASE_MIN_CONNECTIONS", Some("1"))?
                    .parse()
                    .unwrap_or(1),
            },
        })
    }
}
