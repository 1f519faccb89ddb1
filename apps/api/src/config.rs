use anyhow::{Context, Result};

use crate::storage::default_public_base_url;

const SLACK_PLACEHOLDER_URL: &str = "your-slack-webhook-url-here";
const DEFAULT_EMAIL_FROM: &str = "Apply Team <noreply@prodg.studio>";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: Option<String>,
    pub s3_region: String,
    pub s3_public_base_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub resend_api_key: String,
    pub email_from: String,
    /// `None` disables chat notifications.
    pub slack_webhook_url: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub cookie_secure: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_region = optional_env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string());
        let s3_public_base_url = optional_env("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|| default_public_base_url(&s3_bucket, &s3_region));

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_endpoint: optional_env("S3_ENDPOINT"),
            s3_public_base_url,
            s3_region,
            s3_bucket,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            resend_api_key: require_env("RESEND_API_KEY")?,
            email_from: optional_env("EMAIL_FROM")
                .unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            slack_webhook_url: webhook_url(optional_env("SLACK_WEBHOOK_URL")),
            admin_username: require_env("ADMIN_USERNAME")?,
            admin_password: require_env("ADMIN_PASSWORD")?,
            jwt_secret: require_env("JWT_SECRET")?,
            cookie_secure: parse_flag(optional_env("COOKIE_SECURE").as_deref())
                .context("COOKIE_SECURE must be true or false")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn webhook_url(value: Option<String>) -> Option<String> {
    value.filter(|url| url != SLACK_PLACEHOLDER_URL)
}

fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
