//! REST API for interactive projections.
//!
//! Provides three GET endpoints:
//! - `/climates` : climate plan table
//! - `/measures` : measure catalog
//! - `/projection` : ten-year projection for query-supplied city parameters

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::plan::{PlanError, Simulator};

pub use types::{ErrorResponse, ProjectionResponse};

/// Immutable application state shared across all request handlers.
///
/// The scenario supplies defaults for parameters a request omits. Its
/// reference tables are checked once, when the state is built, so a bad
/// scenario never reaches the router. Read-only, so no locks.
pub struct AppState {
    defaults: ScenarioConfig,
    simulator: Simulator,
}

impl AppState {
    /// Builds the state and the simulator every request will share.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency in the scenario's reference tables.
    pub fn new(defaults: ScenarioConfig) -> Result<Self, PlanError> {
        let simulator = defaults.simulator()?.into_owned();
        Ok(Self {
            defaults,
            simulator,
        })
    }

    /// Scenario providing request defaults.
    pub fn defaults(&self) -> &ScenarioConfig {
        &self.defaults
    }

    /// Simulator over the scenario's validated tables.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/climates", get(handlers::get_climates))
        .route("/measures", get(handlers::get_measures))
        .route("/projection", get(handlers::get_projection))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
