//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::AreaCode;
use crate::refresh::{Dataset, RefreshError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/dataset", get(dataset))
        .route("/api/stations", get(stations))
        .route("/api/stairs", get(stairs))
        .route("/api/elevators", get(elevators))
        .route("/api/map", get(map))
        .route("/api/areas/:area_code", get(area))
        .route("/api/refresh", post(refresh))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page, rendered through the template's `IntoResponse`.
async fn index_page(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    IndexTemplate::new(&state.view, &state.icons).map_err(|e| AppError::Internal {
        message: format!("Map config error: {e}"),
    })
}

/// The published dataset, or 503 before the first refresh.
async fn current(state: &AppState) -> Result<Arc<Dataset>, AppError> {
    state.store.current().await.ok_or_else(|| AppError::Unavailable {
        message: "No data loaded yet".to_string(),
    })
}

/// All three collections with stats.
async fn dataset(State(state): State<AppState>) -> Result<Json<DatasetResponse>, AppError> {
    let dataset = current(&state).await?;
    Ok(Json(DatasetResponse::from_dataset(&dataset)))
}

/// Reconciled rail stations.
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationResult>>, AppError> {
    let dataset = current(&state).await?;
    Ok(Json(
        dataset
            .data
            .stations
            .iter()
            .map(StationResult::from_station)
            .collect(),
    ))
}

/// Stairs out of service.
async fn stairs(State(state): State<AppState>) -> Result<Json<Vec<FacilityResult>>, AppError> {
    let dataset = current(&state).await?;
    Ok(Json(
        dataset
            .data
            .stairs
            .iter()
            .map(FacilityResult::from_joined)
            .collect(),
    ))
}

/// Elevators out of service.
async fn elevators(State(state): State<AppState>) -> Result<Json<Vec<FacilityResult>>, AppError> {
    let dataset = current(&state).await?;
    Ok(Json(
        dataset
            .data
            .elevators
            .iter()
            .map(FacilityResult::from_joined)
            .collect(),
    ))
}

/// Marker groups for the current dataset.
async fn map(State(state): State<AppState>) -> Result<Json<MapResponse>, AppError> {
    let dataset = current(&state).await?;
    let mut map = state.map_context();
    map.load(&dataset.data);

    Ok(Json(MapResponse {
        map,
        refreshed_at: dataset.refreshed_at,
    }))
}

/// Station and facility markers of one area.
async fn area(
    State(state): State<AppState>,
    Path(area_code): Path<String>,
) -> Result<Response, AppError> {
    let area_code = AreaCode::parse(&area_code).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let dataset = current(&state).await?;
    let mut map = state.map_context();
    map.load(&dataset.data);

    let area = AreaResponse::from_map(&map, &area_code);
    if area.station.is_none() && area.facilities.is_empty() {
        return Err(AppError::NotFound {
            message: format!("Unknown area: {area_code}"),
        });
    }
    Ok(Json(area).into_response())
}

/// Run a refresh cycle now.
async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let stats = state.store.refresh().await?;
    let refreshed_at = state.store.current().await.map(|d| d.refreshed_at);

    Ok(Json(RefreshResponse {
        stats: stats.into(),
        refreshed_at,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<RefreshError> for AppError {
    fn from(e: RefreshError) -> Self {
        AppError::Unavailable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "request failed");
        } else {
            warn!(status = status.as_u16(), %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
