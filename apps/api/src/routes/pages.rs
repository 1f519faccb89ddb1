use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::views::{AdminLoginPage, IndexPage, SuccessPage};

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage.render()?))
}

/// GET /success
pub async fn handle_success() -> Result<Html<String>, AppError> {
    Ok(Html(SuccessPage.render()?))
}

/// GET /admin/login
pub async fn handle_admin_login() -> Result<Html<String>, AppError> {
    Ok(Html(AdminLoginPage.render()?))
}
