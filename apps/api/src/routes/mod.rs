pub mod admin;
pub mod applications;
pub mod auth;
pub mod health;
pub mod pages;
pub mod upload;
pub mod wizard;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_admin_session;
use crate::state::AppState;
use crate::upload::MAX_RESUME_BYTES;

/// Body limit for routes that accept a resume. Above the resume limit so an oversized
/// file still reaches the size check and gets a specific message.
const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES + 6 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let admin_guard = middleware::from_fn_with_state(state.clone(), require_admin_session);

    Router::new()
        .route("/health", get(health::health_handler))
        // Public pages
        .route("/", get(pages::handle_index))
        .route(
            "/apply",
            get(wizard::handle_wizard_start)
                .post(wizard::handle_wizard_step)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/success", get(pages::handle_success))
        .route("/admin/login", get(pages::handle_admin_login))
        // Public API
        .route(
            "/api/upload",
            post(upload::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/logout", post(auth::handle_logout))
        // Admin: applications list is public for POST, guarded for GET
        .route(
            "/api/applications",
            post(applications::handle_create)
                .merge(get(applications::handle_list).route_layer(admin_guard.clone())),
        )
        .route(
            "/api/applications/:id",
            get(applications::handle_get).route_layer(admin_guard.clone()),
        )
        .route(
            "/admin",
            get(admin::handle_admin).route_layer(admin_guard.clone()),
        )
        // A wildcard never matches an empty segment, so the bare trailing slash is listed
        .route(
            "/admin/",
            get(admin::handle_admin_subpath).route_layer(admin_guard.clone()),
        )
        .route(
            "/admin/*rest",
            get(admin::handle_admin_subpath).route_layer(admin_guard),
        )
        .with_state(state)
}
