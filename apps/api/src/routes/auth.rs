use axum::{
    extract::{rejection::JsonRejection, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{removal_cookie, LOGIN_PATH};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login
/// Checks the admin credentials and sets the session cookie.
pub async fn handle_login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    if !state
        .auth
        .credentials
        .matches(&request.username, &request.password)
    {
        warn!("Failed admin login for '{}'", request.username);
        return Err(AppError::Unauthorized);
    }

    let token = state
        .auth
        .keys
        .issue(&request.username, Utc::now().timestamp())
        .map_err(|e| AppError::Internal(e.into()))?;
    info!("Admin '{}' logged in", request.username);

    Ok((
        jar.add(state.auth.session_cookie(token)),
        Json(json!({
            "success": true,
            "message": "Login successful"
        })),
    ))
}

/// POST /api/auth/logout
pub async fn handle_logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(removal_cookie()), Redirect::to(LOGIN_PATH))
}
