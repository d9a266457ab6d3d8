use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::applications::repository;
use crate::errors::AppError;
use crate::models::application::{ApplicationInput, ApplicationRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Application with id {id} not found"))
}

/// GET /applications
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    Ok(Json(repository::list_applications(&state.db).await?))
}

/// POST /applications
pub async fn handle_create(
    State(state): State<AppState>,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<ApplicationRow>, AppError> {
    Ok(Json(repository::insert_application(&state.db, input).await?))
}

/// GET /applications/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApplicationRow>, AppError> {
    repository::get_application(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// PUT /applications/:id (full replace)
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<ApplicationRow>, AppError> {
    repository::update_application(&state.db, id, input)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    if !repository::delete_application(&state.db, id).await? {
        return Err(not_found(id));
    }
    Ok(Json(DeleteResponse {
        message: format!("Application with id {id} deleted"),
    }))
}
