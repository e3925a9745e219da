//! REST API handlers for the delivery map
//!
//! These handlers use the shared MapService.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::service::{MapService, SceneInput};
use crate::classify::LegendEntry;
use crate::models::{LatLon, RegionId};
use crate::pipeline::RenderCycle;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct SceneRequest {
    pub delivery_csv: String,
    pub orders_csv: Option<String>,
    pub selection: Option<Vec<RegionId>>,
    pub show_orders: Option<bool>,
}

impl From<SceneRequest> for SceneInput {
    fn from(r: SceneRequest) -> Self {
        Self {
            delivery_csv: r.delivery_csv,
            orders_csv: r.orders_csv,
            selection: r.selection,
            show_orders: r.show_orders.unwrap_or(true),
        }
    }
}

#[derive(Deserialize)]
pub struct OriginsRequest {
    pub delivery_csv: String,
}

#[derive(Serialize)]
pub struct OriginsResponse {
    pub origins: Vec<RegionId>,
}

#[derive(Serialize)]
pub struct CentroidResponse {
    pub region: String,
    pub location: LatLon,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<MapService>;

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/legend
pub async fn get_legend(State(service): State<AppState>) -> Json<Vec<LegendEntry>> {
    Json(service.legend())
}

/// GET /api/v1/centroids
pub async fn get_centroids(State(service): State<AppState>) -> Json<Vec<CentroidResponse>> {
    let response = service
        .centroids()
        .into_iter()
        .map(|c| CentroidResponse {
            region: c.region.to_string(),
            location: c.location,
        })
        .collect();
    Json(response)
}

/// POST /api/v1/origins
pub async fn list_origins(
    State(service): State<AppState>,
    Json(req): Json<OriginsRequest>,
) -> Result<Json<OriginsResponse>, ApiError> {
    match service.origins(&req.delivery_csv) {
        Ok(origins) => Ok(Json(OriginsResponse { origins })),
        Err(e) => Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e)),
    }
}

/// POST /api/v1/scene
pub async fn render_scene(
    State(service): State<AppState>,
    Json(req): Json<SceneRequest>,
) -> Result<Json<RenderCycle>, ApiError> {
    match service.render(&SceneInput::from(req)).await {
        Ok(cycle) => {
            if let Some(e) = &cycle.delivery_error {
                return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e));
            }
            Ok(Json(cycle))
        }
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}
