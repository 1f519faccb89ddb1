use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Extension,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::state::AppState;
use crate::views::AdminPage;

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    /// Id of the record whose detail panel is open.
    pub open: Option<String>,
}

/// GET /admin
pub async fn handle_admin(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<AdminQuery>,
) -> Result<Html<String>, AppError> {
    let applications = state.store.list().await?;
    let open = query.open.as_deref().and_then(|id| id.parse::<Uuid>().ok());

    Ok(Html(
        AdminPage::new(session.username, &applications, open).render()?,
    ))
}

/// GET /admin/*
/// Anything else under the admin prefix goes back to the dashboard once the guard
/// has let the request through.
pub async fn handle_admin_subpath() -> Redirect {
    Redirect::to("/admin")
}
