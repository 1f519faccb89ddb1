//! Server-rendered application wizard.
//!
//! Every page carries the whole form state in hidden inputs, so a POST holds the
//! current step, the requested action and all values gathered so far.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use super::upload::{multipart_error, read_file_field, FILE_FIELD};
use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::submit_application;
use crate::upload::{upload_resume, ResumeUpload, UploadError, UploadRejection};
use crate::views::{ApplyPage, SUBMIT_FAILED, UPLOAD_FAILED};
use crate::wizard::{FormValues, SubmitBlocked, Wizard, FIRST_STEP};

const CV_STEP: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Prev,
    Upload,
    Replace,
    Submit,
}

impl WizardAction {
    /// Unknown or missing actions re-render the current step.
    fn parse(value: &str) -> Option<Self> {
        match value {
            "next" => Some(WizardAction::Next),
            "prev" => Some(WizardAction::Prev),
            "upload" => Some(WizardAction::Upload),
            "replace" => Some(WizardAction::Replace),
            "submit" => Some(WizardAction::Submit),
            _ => None,
        }
    }
}

struct WizardForm {
    step: u8,
    action: Option<WizardAction>,
    values: FormValues,
    file: Option<ResumeUpload>,
    /// Set when the body failed mid-read because of the file; `values` then holds
    /// whatever arrived before it.
    rejected: Option<UploadRejection>,
}

async fn read_form(multipart: &mut Multipart) -> Result<WizardForm, AppError> {
    let mut form = WizardForm {
        step: FIRST_STEP,
        action: None,
        values: FormValues::default(),
        file: None,
        rejected: None,
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => match multipart_error(e) {
                AppError::Upload(rejection) => {
                    form.rejected = Some(rejection);
                    break;
                }
                other => return Err(other),
            },
        };
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == FILE_FIELD {
            match read_file_field(field).await {
                Ok(file) => form.file = file,
                Err(AppError::Upload(rejection)) => {
                    form.rejected = Some(rejection);
                    break;
                }
                Err(e) => return Err(e),
            }
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "step" => form.step = value.trim().parse().unwrap_or(FIRST_STEP),
            "action" => form.action = WizardAction::parse(value.trim()),
            "technologies" => {
                let tech = value.trim();
                if !tech.is_empty() && !form.values.technologies.iter().any(|t| t == tech) {
                    form.values.technologies.push(tech.to_string());
                }
            }
            other => {
                form.values.set(other, value);
            }
        }
    }

    Ok(form)
}

fn render(page: ApplyPage) -> Result<Response, AppError> {
    Ok(Html(page.render()?).into_response())
}

/// GET /apply
pub async fn handle_wizard_start() -> Result<Response, AppError> {
    render(ApplyPage::new(&Wizard::new()))
}

/// POST /apply
/// Applies one wizard action and renders the resulting step, or redirects to the
/// success page after a stored submission.
pub async fn handle_wizard_step(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(&mut multipart).await?;
    if let Some(rejection) = form.rejected {
        let wizard = Wizard::resume(CV_STEP, form.values);
        return render(ApplyPage::new(&wizard).with_upload_error(rejection.to_string()));
    }
    let mut wizard = Wizard::resume(form.step, form.values);

    if wizard.step() == CV_STEP {
        if let Some(upload_error) = apply_cv_change(&state, &mut wizard, form.action, form.file).await
        {
            return render(ApplyPage::new(&wizard).with_upload_error(upload_error));
        }
    }

    match form.action {
        Some(WizardAction::Next) => {
            wizard.next();
        }
        Some(WizardAction::Prev) => {
            wizard.prev();
        }
        Some(WizardAction::Submit) => match wizard.submit() {
            Ok(application) => match submit_application(&state, application).await {
                Ok(_) => return Ok(Redirect::to("/success").into_response()),
                Err(e) => {
                    error!("Wizard submission failed: {e}");
                    return render(ApplyPage::new(&wizard).with_alert(SUBMIT_FAILED));
                }
            },
            Err(SubmitBlocked::NotTerminal) | Err(SubmitBlocked::Invalid { .. }) => {}
        },
        Some(WizardAction::Upload) | Some(WizardAction::Replace) | None => {}
    }

    render(ApplyPage::new(&wizard))
}

/// Handles the CV step's file actions. Returns the message to show when the upload
/// did not go through.
async fn apply_cv_change(
    state: &AppState,
    wizard: &mut Wizard,
    action: Option<WizardAction>,
    file: Option<ResumeUpload>,
) -> Option<String> {
    if action == Some(WizardAction::Replace) {
        wizard.values_mut().clear_cv();
        return None;
    }

    let Some(file) = file else {
        return (action == Some(WizardAction::Upload))
            .then(|| UploadRejection::Missing.to_string());
    };

    match upload_resume(state.storage.as_ref(), file).await {
        Ok(stored) => {
            wizard.values_mut().attach_cv(stored.url, stored.file_name);
            None
        }
        Err(UploadError::Rejected(rejection)) => Some(rejection.to_string()),
        Err(UploadError::Storage(e)) => {
            warn!("Resume upload failed: {e}");
            Some(UPLOAD_FAILED.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use bytes::Bytes;
    use tower::ServiceExt;

    use super::*;
    use crate::store::ApplicationStore;
    use crate::testing::{multipart_body, TestHarness};

    const BOUNDARY: &str = "X-WIZARD-BOUNDARY";

    fn post(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/apply")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(BOUNDARY, fields, file)))
            .unwrap()
    }

    async fn html(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn complete_fields(step: &'static str, action: &'static str) -> Vec<(&'static str, &'static str)> {
        vec![
            ("step", step),
            ("action", action),
            ("name", "Grace Hopper"),
            ("email", "grace@example.com"),
            ("phone", "+1 555 0100"),
            ("country", "United States"),
            ("heardAboutUs", "friend_referral"),
            ("heardAboutUsOther", ""),
            (
                "motivation",
                "I want to build compilers that make programming accessible to everyone.",
            ),
            ("proudProject", "The first COBOL compiler and its tooling."),
            ("dreamProject", "A language everyone can read like plain English."),
            ("technologies", "Rust"),
            ("technologies", "Go"),
            ("githubUrl", ""),
            ("linkedinUrl", "https://linkedin.com/in/grace"),
            ("portfolioUrl", ""),
        ]
    }

    #[tokio::test]
    async fn test_get_renders_first_step() {
        let harness = TestHarness::new();
        let request = Request::get("/apply").body(Body::empty()).unwrap();
        let response = harness.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(html(response).await.contains("Step 1 of 6"));
    }

    #[tokio::test]
    async fn test_next_blocked_on_empty_step_one() {
        let harness = TestHarness::new();
        let response = harness
            .router()
            .oneshot(post(&[("step", "1"), ("action", "next")], None))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(page.contains("Step 1 of 6"));
        assert!(page.contains("Name is required"));
        assert!(page.contains("Please tell us how you heard about us"));
    }

    #[tokio::test]
    async fn test_next_advances_and_keeps_values_hidden() {
        let harness = TestHarness::new();
        let response = harness
            .router()
            .oneshot(post(&complete_fields("1", "next"), None))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(page.contains("Step 2 of 6"));
        assert!(page.contains(r#"name="name" value="Grace Hopper""#));
        assert!(page.contains(r#"name="technologies" value="Rust""#));
    }

    #[tokio::test]
    async fn test_upload_on_cv_step_attaches_file() {
        let harness = TestHarness::new();
        let response = harness
            .router()
            .oneshot(post(
                &complete_fields("2", "upload"),
                Some(("cv.pdf", "application/pdf", b"%PDF-1.7")),
            ))
            .await
            .unwrap();

        let page = html(response).await;
        assert_eq!(harness.storage.put_count(), 1);
        assert!(page.contains("Step 2 of 6"));
        assert!(page.contains("Replace file"));
        assert!(page.contains(r#"name="cvFileName" value="cv.pdf""#));
    }

    #[tokio::test]
    async fn test_rejected_upload_stays_on_cv_step() {
        let harness = TestHarness::new();
        let response = harness
            .router()
            .oneshot(post(
                &complete_fields("2", "next"),
                Some(("photo.png", "image/png", b"\x89PNG")),
            ))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(page.contains("Step 2 of 6"));
        assert!(page.contains("Only PDF and DOC files are allowed"));
        assert!(!page.contains("cvFileName"));
        assert_eq!(harness.storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_body_over_limit_keeps_answers_on_cv_step() {
        let harness = TestHarness::new();
        let oversized = vec![b'x'; 17 * 1024 * 1024];
        let body = multipart_body(
            BOUNDARY,
            &complete_fields("2", "upload"),
            Some(("cv.pdf", "application/pdf", &oversized)),
        );
        // Streamed in chunks the way a browser sends it, so the fields ahead of the
        // file arrive before the limit trips.
        let chunks: Vec<Result<Bytes, std::io::Error>> = body
            .chunks(64 * 1024)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        let request = Request::builder()
            .method("POST")
            .uri("/apply")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from_stream(futures_util::stream::iter(chunks)))
            .unwrap();

        let response = harness.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = html(response).await;
        assert!(page.contains("Step 2 of 6"));
        assert!(page.contains("File size must be less than 10MB"));
        assert!(page.contains(r#"name="name" value="Grace Hopper""#));
        assert!(page.contains(r#"name="email" value="grace@example.com""#));
        assert!(page.contains(r#"name="technologies" value="Go""#));
        assert_eq!(harness.storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_shows_generic_message() {
        let harness = TestHarness::with_failing_storage();
        let response = harness
            .router()
            .oneshot(post(
                &complete_fields("2", "upload"),
                Some(("cv.pdf", "application/pdf", b"%PDF-1.7")),
            ))
            .await
            .unwrap();

        assert!(html(response).await.contains(UPLOAD_FAILED));
    }

    #[tokio::test]
    async fn test_replace_clears_cv() {
        let harness = TestHarness::new();
        let mut fields = complete_fields("2", "replace");
        fields.push(("cvUrl", "https://cdn.test/cv-uploads/1-cv.pdf"));
        fields.push(("cvFileName", "cv.pdf"));
        let response = harness.router().oneshot(post(&fields, None)).await.unwrap();

        let page = html(response).await;
        assert!(!page.contains("cvFileName"));
        assert!(page.contains("Upload your CV"));
    }

    #[tokio::test]
    async fn test_submit_stores_and_redirects() {
        let harness = TestHarness::new();
        let response = harness
            .router()
            .oneshot(post(&complete_fields("6", "submit"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/success");
        let stored = harness.store.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].details.technologies, vec!["Rust", "Go"]);
        assert_eq!(harness.chat.calls(), 1);
        assert_eq!(harness.mailer.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_shows_alert_and_keeps_values() {
        let harness = TestHarness::with_failing_store();
        let response = harness
            .router()
            .oneshot(post(&complete_fields("6", "submit"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = html(response).await;
        assert!(page.contains(SUBMIT_FAILED));
        assert!(page.contains("Step 6 of 6"));
        assert!(page.contains("https://linkedin.com/in/grace"));
    }

    #[tokio::test]
    async fn test_submit_with_invalid_earlier_step_jumps_back() {
        let harness = TestHarness::new();
        let mut fields = complete_fields("6", "submit");
        fields.retain(|(k, _)| *k != "motivation");
        fields.push(("motivation", "too short"));
        let response = harness.router().oneshot(post(&fields, None)).await.unwrap();

        let page = html(response).await;
        assert!(page.contains("Step 3 of 6"));
        assert!(page.contains("at least 50 characters"));
        assert!(harness.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prev_needs_no_validation() {
        let harness = TestHarness::new();
        let response = harness
            .router()
            .oneshot(post(&[("step", "3"), ("action", "prev")], None))
            .await
            .unwrap();
        assert!(html(response).await.contains("Step 2 of 6"));
    }
}
