use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Application, NewApplication};
use crate::state::AppState;
use crate::submission::submit_application;
use crate::wizard::FormValues;

/// POST /api/applications
/// Accepts a complete application as JSON. The same field rules as the wizard apply.
pub async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<NewApplication>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let application = FormValues::from(&payload)
        .to_new_application()
        .map_err(AppError::InvalidFields)?;

    let stored = submit_application(&state, application).await?;

    Ok(Json(json!({
        "success": true,
        "id": stored.id
    })))
}

/// GET /api/applications
/// All applications, newest first. Admin only.
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/applications/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}
