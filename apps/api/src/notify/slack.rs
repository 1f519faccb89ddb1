use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{check_status, ChatNotifier, NotifyError};
use crate::models::Application;

pub struct SlackNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(client: Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    async fn post(&self, payload: &Value) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;
        check_status(response).await
    }
}

#[async_trait]
impl ChatNotifier for SlackNotifier {
    async fn notify(&self, application: &Application) {
        match self.post(&build_message(application)).await {
            Ok(()) => info!("Posted Slack notification for {}", application.id),
            Err(e) => warn!("Slack notification failed for {}: {e}", application.id),
        }
    }
}

/// Slack treats `<...>` as links and mentions (`<!channel>`), so applicant text is
/// escaped with the three entities it recognises.
fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Block Kit payload: header, applicant summary, and link buttons for whichever of
/// CV and LinkedIn are present.
pub fn build_message(application: &Application) -> Value {
    let details = &application.details;
    let technologies = if details.technologies.is_empty() {
        "None specified".to_string()
    } else {
        escape_mrkdwn(&details.technologies.join(", "))
    };

    let mut blocks = vec![
        json!({
            "type": "header",
            "text": { "type": "plain_text", "text": "New Application", "emoji": true }
        }),
        json!({
            "type": "section",
            "fields": [
                { "type": "mrkdwn", "text": format!("*Name:*\n{}", escape_mrkdwn(&details.name)) },
                { "type": "mrkdwn", "text": format!("*Email:*\n{}", escape_mrkdwn(&details.email)) },
                { "type": "mrkdwn", "text": format!("*Technologies:*\n{technologies}") }
            ]
        }),
    ];

    let buttons: Vec<Value> = [
        ("View CV", details.cv_url.as_deref()),
        ("View LinkedIn", details.linkedin_url.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.map(|url| {
            json!({
                "type": "button",
                "text": { "type": "plain_text", "text": label, "emoji": true },
                "url": url
            })
        })
    })
    .collect();

    if !buttons.is_empty() {
        blocks.push(json!({ "type": "actions", "elements": buttons }));
    }

    json!({
        "text": "New Application!",
        "blocks": blocks
    })
}
