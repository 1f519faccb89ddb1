use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ApplicationStore;
use crate::errors::AppError;
use crate::models::{normalize_technologies, Application, ApplicationStatus, NewApplication};

/// Vec-backed store used by tests; insertion order doubles as the tie-breaker.
#[derive(Default)]
pub struct MemoryApplicationStore {
    records: RwLock<Vec<Application>>,
    fail: bool,
}

impl MemoryApplicationStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Inserts with an explicit submission time.
    pub async fn create_at(
        &self,
        mut application: NewApplication,
        submitted_at: DateTime<Utc>,
    ) -> Result<Application, AppError> {
        if self.fail {
            return Err(AppError::Internal(anyhow::anyhow!("store unavailable")));
        }
        application.technologies = normalize_technologies(application.technologies);
        let record = Application {
            id: Uuid::new_v4(),
            details: application,
            submitted_at,
            status: ApplicationStatus::Pending,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn create(&self, application: NewApplication) -> Result<Application, AppError> {
        self.create_at(application, Utc::now()).await
    }

    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let mut records: Vec<Application> =
            self.records.read().await.iter().rev().cloned().collect();
        // Stable sort keeps the reversed insertion order among equal timestamps.
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(records)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        Ok(self.records.read().await.iter().find(|a| a.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_new_application;
    use chrono::TimeZone;

    fn named(name: &str) -> NewApplication {
        NewApplication {
            name: name.to_string(),
            ..sample_new_application()
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryApplicationStore::default();
        let t1 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
        store.create_at(named("second"), t2).await.unwrap();
        store.create_at(named("first"), t1).await.unwrap();
        store.create_at(named("third"), t3).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.details.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_newest_insert_first() {
        let store = MemoryApplicationStore::default();
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        store.create_at(named("a"), t).await.unwrap();
        store.create_at(named("b"), t).await.unwrap();

        let list = store.list().await.unwrap();
        assert_eq!(list[0].details.name, "b");
        assert_eq!(list[1].details.name, "a");
    }

    #[tokio::test]
    async fn test_create_stamps_pending_and_get_finds_it() {
        let store = MemoryApplicationStore::default();
        let created = store.create(sample_new_application()).await.unwrap();
        assert_eq!(created.status, ApplicationStatus::Pending);

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
    }
}
