//! Application startup and lifecycle management.

use crate::config::LocationsConfig;
use crate::handlers::{
    health::health_check,
    locations::get_locations,
    metrics::metrics,
    pages::{heatmap_page, home, map_page, plots_page},
};
use crate::services::Database;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. The pool inside `Database` is created once at
/// startup; each request checks its own connection out and back in.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/map", get(map_page))
        .route("/heatmap", get(heatmap_page))
        .route("/plots", get(plots_page))
        .route("/api/v1.0/locations", get(get_locations))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        // The map pages fetch the API from the browser; mirror the original
        // deployment's allow-all CORS policy.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Connecting and validating the schema here keeps database problems
    /// startup-fatal: the process never starts serving against a store it
    /// cannot read.
    pub async fn build(config: LocationsConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to initialize database: {}", e);
            e
        })?;

        let state = AppState { db };

        // Listen on all interfaces; port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("locations-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
