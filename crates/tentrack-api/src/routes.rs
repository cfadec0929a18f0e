//! HTTP routes for the tent inventory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::json;
use tentrack_core::{Stats, Tent};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dto::{CreateTentRequest, UpdateTentRequest};
use crate::error::ApiError;
use crate::storage::TentDatabase;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: TentDatabase,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/tents", get(list_tents).post(create_tent))
        .route("/tents/{id}", patch(update_tent).delete(delete_tent))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /tents` — all tents, newest first.
pub async fn list_tents(State(state): State<AppState>) -> Result<Json<Vec<Tent>>, ApiError> {
    let tents = state
        .db
        .list_tents()
        .await
        .map_err(|e| ApiError::internal("failed to list tents", &e))?;
    Ok(Json(tents))
}

/// `POST /tents` — create a tent, 201 with the stored record.
pub async fn create_tent(
    State(state): State<AppState>,
    Json(body): Json<CreateTentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = body.into_new_tent()?;
    let tent = state
        .db
        .create_tent(&new)
        .await
        .map_err(|e| ApiError::internal("failed to create tent", &e))?;
    info!(id = %tent.id, name = %tent.name, "Tent created");
    Ok((StatusCode::CREATED, Json(tent)))
}

/// `PATCH /tents/{id}` — full or partial update.
pub async fn update_tent(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateTentRequest>,
) -> Result<Json<Tent>, ApiError> {
    let patch = body.into_patch()?;
    let tent = state
        .db
        .update_tent(&id, &patch)
        .await
        .map_err(|e| ApiError::from_store("failed to update tent", &id, &e))?;
    info!(id = %tent.id, status = %tent.status, "Tent updated");
    Ok(Json(tent))
}

/// `DELETE /tents/{id}` — hard delete, 204 with no body.
pub async fn delete_tent(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .delete_tent(&id)
        .await
        .map_err(|e| ApiError::from_store("failed to delete tent", &id, &e))?;
    info!(id = %id, "Tent deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /stats` — dashboard counts.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let stats = state
        .db
        .stats()
        .await
        .map_err(|e| ApiError::internal("failed to count tents", &e))?;
    Ok(Json(stats))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| ApiError::internal("database unavailable", &e))?;
    Ok(Json(json!({ "status": "ok" })))
}
