//! Best-effort notifications sent after an application is stored.
//!
//! Two independent sends: a chat message to the hiring channel and a confirmation
//! email to the applicant. Neither is retried and neither can fail a submission.

pub mod email;
pub mod slack;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::Application;

pub use email::ResendMailer;
pub use slack::SlackNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to render email: {0}")]
    Render(String),
}

/// Posts a new-application message to a team chat. Implementations log and swallow
/// their own failures.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn notify(&self, application: &Application);
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_confirmation(&self, application: &Application) -> Result<(), NotifyError>;
}

/// Chat notifier used when no webhook is configured.
pub struct DisabledChat;

#[async_trait]
impl ChatNotifier for DisabledChat {
    async fn notify(&self, application: &Application) {
        tracing::debug!("Chat disabled; skipping notification for {}", application.id);
    }
}

/// Runs both sends concurrently and waits for them to finish.
pub async fn fan_out(chat: &dyn ChatNotifier, mailer: &dyn Mailer, application: &Application) {
    let (_, email) = tokio::join!(
        chat.notify(application),
        mailer.send_confirmation(application)
    );
    if let Err(e) = email {
        warn!(
            "Failed to send confirmation email for application {}: {e}",
            application.id
        );
    }
}

/// Reads a non-success response into `NotifyError::Api`.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), NotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().await.unwrap_or_default();
    Err(NotifyError::Api {
        status: status.as_u16(),
        message,
    })
}
