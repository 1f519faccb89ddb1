mod auth;
mod config;
mod db;
mod errors;
mod models;
mod notify;
mod routes;
mod state;
mod storage;
mod store;
mod submission;
mod upload;
mod views;
mod wizard;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{AdminCredentials, AuthSettings, SessionKeys};
use crate::config::Config;
use crate::db::create_pool;
use crate::notify::{ChatNotifier, DisabledChat, ResendMailer, SlackNotifier};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::S3ResumeStorage;
use crate::store::PgApplicationStore;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("apply_api={},tower_http={}", &config.rust_log, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Apply API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let storage = S3ResumeStorage::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_public_base_url.clone(),
    );
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Outbound notifications share one HTTP client
    let http = reqwest::Client::builder()
        .timeout(NOTIFY_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let chat: Arc<dyn ChatNotifier> = match &config.slack_webhook_url {
        Some(url) => {
            info!("Slack notifications enabled");
            Arc::new(SlackNotifier::new(http.clone(), url.clone()))
        }
        None => {
            info!("SLACK_WEBHOOK_URL not set; Slack notifications disabled");
            Arc::new(DisabledChat)
        }
    };
    let mailer = ResendMailer::new(
        http,
        config.resend_api_key.clone(),
        config.email_from.clone(),
    );

    let state = AppState {
        store: Arc::new(PgApplicationStore::new(db)),
        storage: Arc::new(storage),
        chat,
        mailer: Arc::new(mailer),
        auth: AuthSettings {
            credentials: AdminCredentials::new(
                config.admin_username.clone(),
                config.admin_password.clone(),
            ),
            keys: SessionKeys::new(config.jwt_secret.clone(), chrono::Duration::hours(24)),
            cookie_secure: config.cookie_secure,
        },
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for AWS, or for MinIO when `S3_ENDPOINT` is set.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "apply-static",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials);
    if let Some(endpoint) = &config.s3_endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.s3_endpoint.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
