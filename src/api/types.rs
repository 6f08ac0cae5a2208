//! API response types.

use serde::Serialize;

use crate::plan::kpi::ProjectionSummary;
use crate::plan::types::Projection;

/// Projection plus its summary indicators.
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    /// Aggregate indicators.
    pub summary: ProjectionSummary,
    /// Inputs echo and per-year records.
    #[serde(flatten)]
    pub projection: Projection,
}

impl From<Projection> for ProjectionResponse {
    fn from(projection: Projection) -> Self {
        Self {
            summary: ProjectionSummary::from_projection(&projection),
            projection,
        }
    }
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
