//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, ProjectionResponse};
use crate::config::Overrides;
use crate::plan::PlanError;
use crate::plan::climate::ClimatePlan;
use crate::plan::measure::Measure;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: &PlanError) -> ApiError {
    let status = match e {
        PlanError::UnknownClimate { .. } => StatusCode::NOT_FOUND,
        PlanError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        PlanError::MissingMeasure { .. } | PlanError::DuplicateName { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    warn!(%status, error = %e, "request rejected");
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Returns the climate plan table in table order.
///
/// `GET /climates` → 200 + `Vec<ClimatePlan>` JSON
pub async fn get_climates(State(state): State<Arc<AppState>>) -> Json<Vec<ClimatePlan>> {
    Json(state.simulator().plans().iter().cloned().collect())
}

/// Returns the measure catalog in catalog order.
///
/// `GET /measures` → 200 + `Vec<Measure>` JSON
pub async fn get_measures(State(state): State<Arc<AppState>>) -> Json<Vec<Measure>> {
    Json(state.simulator().catalog().iter().cloned().collect())
}

/// Runs a projection with query parameters layered over the defaults.
///
/// `GET /projection` → 200 + `ProjectionResponse` JSON
/// `GET /projection?climate=Sunny&budget=50&apartments=100` → overridden run
/// `GET /projection?budget=-1` → 400 + `ErrorResponse`
/// `GET /projection?climate=Tropical` → 404 + `ErrorResponse`
pub async fn get_projection(
    State(state): State<Arc<AppState>>,
    Query(overrides): Query<Overrides>,
) -> Result<Json<ProjectionResponse>, ApiError> {
    let mut scenario = state.defaults().clone();
    scenario.apply(&overrides);
    let projection = scenario
        .run_with(state.simulator())
        .map_err(|e| error_response(&e))?;
    Ok(Json(projection.into()))
}
