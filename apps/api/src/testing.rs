//! Fakes for every collaborator trait, plus a harness that wires them into `AppState`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{AdminCredentials, AuthSettings, SessionKeys, SESSION_COOKIE};
use crate::models::{Application, ApplicationStatus, HeardAboutUs, NewApplication};
use crate::notify::{ChatNotifier, Mailer, NotifyError};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{ResumeStorage, StorageError};
use crate::store::memory::MemoryApplicationStore;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_SECRET: &str = "test-jwt-secret";

pub fn sample_new_application() -> NewApplication {
    NewApplication {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        country: "United Kingdom".to_string(),
        heard_about_us: HeardAboutUs::Linkedin,
        heard_about_us_other: None,
        cv_url: Some("https://cdn.test/cv-uploads/1-ada.pdf".to_string()),
        cv_file_name: Some("ada.pdf".to_string()),
        motivation: "I want to work on engines that turn numbers into music and poetry."
            .to_string(),
        proud_project: "Notes on the Analytical Engine, including the first program."
            .to_string(),
        dream_project: "A general-purpose machine that composes elaborate music."
            .to_string(),
        technologies: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        github_url: None,
        linkedin_url: Some("https://linkedin.com/in/ada".to_string()),
        portfolio_url: None,
    }
}

pub fn sample_application() -> Application {
    Application {
        id: Uuid::new_v4(),
        details: sample_new_application(),
        submitted_at: Utc::now(),
        status: ApplicationStatus::Pending,
    }
}

#[derive(Default)]
pub struct RecordingStorage {
    puts: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingStorage {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }

    /// `(key, content_type)` of the most recent put.
    pub fn last_put(&self) -> Option<(String, String)> {
        self.puts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ResumeStorage for RecordingStorage {
    async fn put(
        &self,
        key: &str,
        _body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail {
            return Err(StorageError::Upload("bucket unreachable".to_string()));
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string()));
        Ok(format!("https://cdn.test/{key}"))
    }
}

#[derive(Default)]
pub struct RecordingChat {
    calls: AtomicUsize,
}

impl RecordingChat {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatNotifier for RecordingChat {
    async fn notify(&self, _application: &Application) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_confirmation(&self, _application: &Application) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Api {
                status: 503,
                message: "mail provider down".to_string(),
            });
        }
        Ok(())
    }
}

/// App state over fakes, with handles kept for assertions.
pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<MemoryApplicationStore>,
    pub storage: Arc<RecordingStorage>,
    pub chat: Arc<RecordingChat>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(
            MemoryApplicationStore::default(),
            RecordingStorage::default(),
            RecordingMailer::default(),
        )
    }

    pub fn with_failing_mailer() -> Self {
        Self::build(
            MemoryApplicationStore::default(),
            RecordingStorage::default(),
            RecordingMailer::failing(),
        )
    }

    pub fn with_failing_store() -> Self {
        Self::build(
            MemoryApplicationStore::failing(),
            RecordingStorage::default(),
            RecordingMailer::default(),
        )
    }

    pub fn with_failing_storage() -> Self {
        Self::build(
            MemoryApplicationStore::default(),
            RecordingStorage::failing(),
            RecordingMailer::default(),
        )
    }

    fn build(
        store: MemoryApplicationStore,
        storage: RecordingStorage,
        mailer: RecordingMailer,
    ) -> Self {
        let store = Arc::new(store);
        let storage = Arc::new(storage);
        let chat = Arc::new(RecordingChat::default());
        let mailer = Arc::new(mailer);

        let state = AppState {
            store: store.clone(),
            storage: storage.clone(),
            chat: chat.clone(),
            mailer: mailer.clone(),
            auth: AuthSettings {
                credentials: AdminCredentials::new(
                    TEST_USERNAME.to_string(),
                    TEST_PASSWORD.to_string(),
                ),
                keys: SessionKeys::new(TEST_SECRET, Duration::hours(24)),
                cookie_secure: false,
            },
        };

        Self {
            state,
            store,
            storage,
            chat,
            mailer,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// `Cookie` header value carrying a fresh admin session.
    pub fn admin_cookie(&self) -> String {
        let token = self
            .state
            .auth
            .keys
            .issue(TEST_USERNAME, Utc::now().timestamp())
            .unwrap();
        format!("{SESSION_COOKIE}={token}")
    }
}

/// Builds a `multipart/form-data` body from text fields and an optional file part.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
