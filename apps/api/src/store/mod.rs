//! Application record store.
//!
//! `AppState` carries an `Arc<dyn ApplicationStore>`. Records are append-only from the
//! service's point of view: `create` stamps id, submission time and `pending` status.

#[cfg(test)]
pub mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Application, NewApplication};

pub use postgres::PgApplicationStore;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(&self, application: NewApplication) -> Result<Application, AppError>;

    /// Newest first; records sharing a timestamp come back in reverse insertion order.
    async fn list(&self) -> Result<Vec<Application>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError>;
}
