use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::ApplicationStore;
use crate::errors::AppError;
use crate::models::{normalize_technologies, Application, ApplicationRow, NewApplication};

const COLUMNS: &str = "id, name, email, phone, country, heard_about_us, heard_about_us_other, \
     cv_url, cv_file_name, motivation, proud_project, dream_project, technologies, \
     github_url, linkedin_url, portfolio_url, submitted_at, status";

pub struct PgApplicationStore {
    db: PgPool,
}

impl PgApplicationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn into_application(row: ApplicationRow) -> Result<Application, AppError> {
    let id = row.id;
    Application::try_from(row)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt application {id}: {e}")))
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn create(&self, application: NewApplication) -> Result<Application, AppError> {
        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO applications (id, name, email, phone, country, heard_about_us, \
             heard_about_us_other, cv_url, cv_file_name, motivation, proud_project, \
             dream_project, technologies, github_url, linkedin_url, portfolio_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .bind(&application.name)
            .bind(&application.email)
            .bind(&application.phone)
            .bind(&application.country)
            .bind(application.heard_about_us.as_str())
            .bind(&application.heard_about_us_other)
            .bind(&application.cv_url)
            .bind(&application.cv_file_name)
            .bind(&application.motivation)
            .bind(&application.proud_project)
            .bind(&application.dream_project)
            .bind(normalize_technologies(application.technologies.clone()))
            .bind(&application.github_url)
            .bind(&application.linkedin_url)
            .bind(&application.portfolio_url)
            .fetch_one(&self.db)
            .await?;

        info!("Created application {id}");
        into_application(row)
    }

    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM applications ORDER BY submitted_at DESC, seq DESC");
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(into_application).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.map(into_application).transpose()
    }
}
