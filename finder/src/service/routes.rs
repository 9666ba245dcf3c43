//! HTTP route handlers for the placement-counting API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{ShapeCatalog, ShapeKind};
use crate::engine::{Constraints, EngineError, PlacementIndex};
use crate::protocol::{ErrorBody, PositionRequest, PositionResponse};

/// Application state shared by the counting routes
#[derive(Clone)]
pub struct PositionAppState {
    pub catalog: Arc<ShapeCatalog>,
    pub index: Arc<PlacementIndex>,
}

impl PositionAppState {
    /// Enumerate placements for every catalog shape up front
    pub fn new(catalog: Arc<ShapeCatalog>) -> Self {
        let index = Arc::new(PlacementIndex::build(&catalog));
        Self { catalog, index }
    }
}

/// Error response for the counting API
#[derive(Debug)]
pub struct PositionErrorResponse(ErrorBody);

impl From<EngineError> for PositionErrorResponse {
    fn from(e: EngineError) -> Self {
        let code = match &e {
            EngineError::UnknownShape(_) => "unknown_shape",
            EngineError::InvalidCell(_) => "invalid_cell",
        };
        Self(ErrorBody {
            error: e.to_string(),
            code: code.to_string(),
        })
    }
}

impl IntoResponse for PositionErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

/// Catalog entry as listed by `GET /api/shapes`
#[derive(Debug, Serialize, Deserialize)]
pub struct ShapeListItem {
    pub id: String,
    pub offsets: Vec<(i32, i32)>,
    pub description: String,
    pub independent_segments: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    shapes: usize,
}

/// POST /get_positions - Count placements covering each cell
pub async fn get_positions(
    State(state): State<PositionAppState>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<PositionResponse>, PositionErrorResponse> {
    let start = Instant::now();
    counter!("treasure_positions_requests_total").increment(1);

    let coverage = Constraints::from_pairs(&request.has_treasure, &request.no_treasure)
        .and_then(|constraints| state.index.count(&request.shapes, constraints))
        .map_err(|e| {
            counter!("treasure_positions_rejected_total").increment(1);
            tracing::warn!("Rejected position request {:?}: {}", request.shapes, e);
            PositionErrorResponse::from(e)
        })?;

    tracing::debug!(
        "Counted {} placements for shapes {:?} (treasure={}, empty={})",
        coverage.total,
        request.shapes,
        request.has_treasure.len(),
        request.no_treasure.len()
    );
    histogram!("treasure_positions_request_duration_seconds").record(start.elapsed());

    Ok(Json(coverage.into()))
}

/// GET /api/shapes - List the shape catalog in picklist order
pub async fn list_shapes(State(state): State<PositionAppState>) -> Json<Vec<ShapeListItem>> {
    Json(
        state
            .catalog
            .iter()
            .map(|shape| ShapeListItem {
                id: shape.id.clone(),
                offsets: shape.offsets.clone(),
                description: shape.description.clone(),
                independent_segments: matches!(shape.kind, ShapeKind::Segments { .. }),
            })
            .collect(),
    )
}

/// GET /health
async fn health(State(state): State<PositionAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        shapes: state.catalog.len(),
    })
}

/// Build the counting API routes
pub fn position_routes(state: PositionAppState) -> Router {
    Router::new()
        .route("/get_positions", post(get_positions))
        .route("/api/shapes", get(list_shapes))
        .route("/health", get(health))
        .with_state(state)
}
