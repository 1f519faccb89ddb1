use std::sync::Arc;

use crate::auth::AuthSettings;
use crate::notify::{ChatNotifier, Mailer};
use crate::storage::ResumeStorage;
use crate::store::ApplicationStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ApplicationStore>,
    pub storage: Arc<dyn ResumeStorage>,
    pub chat: Arc<dyn ChatNotifier>,
    pub mailer: Arc<dyn Mailer>,
    pub auth: AuthSettings,
}
