//! Admin authentication: a single configured account, a signed session cookie, and the
//! guard that protects admin pages and admin JSON endpoints.

pub mod token;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
pub use token::SessionKeys;

pub const SESSION_COOKIE: &str = "admin-token";
pub const LOGIN_PATH: &str = "/admin/login";

#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Both fields are always compared, in time independent of where they differ.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

#[derive(Clone)]
pub struct AuthSettings {
    pub credentials: AdminCredentials,
    pub keys: SessionKeys,
    pub cookie_secure: bool,
}

impl AuthSettings {
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = time::Duration::seconds(self.keys.ttl().num_seconds());
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(max_age)
            .secure(self.cookie_secure)
            .build()
    }
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Inserted into request extensions once the session cookie checks out.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
}

/// Guards admin routes. API paths answer 401; pages redirect to the login page.
pub async fn require_admin_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    if let Some(token) = token {
        match state.auth.keys.verify(&token, Utc::now().timestamp()) {
            Ok(claims) => {
                request.extensions_mut().insert(AdminSession {
                    username: claims.username,
                });
                return next.run(request).await;
            }
            Err(e) => warn!("Rejected admin session on {}: {e}", request.uri().path()),
        }
    }

    if request.uri().path().starts_with("/api/") {
        AppError::Unauthorized.into_response()
    } else {
        Redirect::to(LOGIN_PATH).into_response()
    }
}
