use askama::Template;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use super::{check_status, Mailer, NotifyError};
use crate::models::Application;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

pub const NEXT_STEPS: [(&str, &str); 3] = [
    ("Review", "Our team will review your application within 2 weeks."),
    (
        "Interview",
        "If selected, we'll schedule a conversation to get to know you better.",
    ),
    (
        "Decision",
        "You'll hear from us with our decision and next steps.",
    ),
];

#[derive(Template)]
#[template(path = "email_confirmation.html")]
pub struct ConfirmationEmail<'a> {
    pub name: &'a str,
    pub steps: &'a [(&'a str, &'a str)],
}

impl<'a> ConfirmationEmail<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            steps: &NEXT_STEPS,
        }
    }
}

pub fn subject(name: &str) -> String {
    format!("Application Received - Nice to meet you, {name}!")
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

/// Sends transactional mail through the Resend HTTP API.
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(client: Client, api_key: String, from: String) -> Self {
        Self {
            client,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_confirmation(&self, application: &Application) -> Result<(), NotifyError> {
        let details = &application.details;
        let html = ConfirmationEmail::new(&details.name)
            .render()
            .map_err(|e| NotifyError::Render(e.to_string()))?;

        let request = ResendRequest {
            from: &self.from,
            to: [&details.email],
            subject: subject(&details.name),
            html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        check_status(response).await?;

        info!("Sent confirmation email for application {}", application.id);
        Ok(())
    }
}
