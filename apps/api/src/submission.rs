//! Submission service shared by the wizard form and the JSON endpoint.

use crate::errors::AppError;
use crate::models::{Application, NewApplication};
use crate::notify::fan_out;
use crate::state::AppState;

/// Stores the application, then notifies. Only a store failure is reported to the
/// caller; notification problems are logged by `fan_out`.
pub async fn submit_application(
    state: &AppState,
    application: NewApplication,
) -> Result<Application, AppError> {
    let stored = state.store.create(application).await?;
    fan_out(state.chat.as_ref(), state.mailer.as_ref(), &stored).await;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplicationStatus;
    use crate::store::ApplicationStore;
    use crate::testing::{sample_new_application, TestHarness};

    #[tokio::test]
    async fn test_submission_stores_one_pending_record_and_notifies() {
        let harness = TestHarness::new();
        let before = chrono::Utc::now();

        let app = submit_application(&harness.state, sample_new_application())
            .await
            .unwrap();

        let all = harness.store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, app.id);
        assert_eq!(all[0].status, ApplicationStatus::Pending);
        assert!(all[0].submitted_at >= before);
        assert_eq!(harness.chat.calls(), 1);
        assert_eq!(harness.mailer.calls(), 1);
    }

    #[tokio::test]
    async fn test_email_failure_still_succeeds() {
        let harness = TestHarness::with_failing_mailer();

        let result = submit_application(&harness.state, sample_new_application()).await;

        assert!(result.is_ok());
        assert_eq!(harness.store.list().await.unwrap().len(), 1);
        assert_eq!(harness.mailer.calls(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_skips_notifications() {
        let harness = TestHarness::with_failing_store();

        let result = submit_application(&harness.state, sample_new_application()).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(harness.chat.calls(), 0);
        assert_eq!(harness.mailer.calls(), 0);
    }
}
