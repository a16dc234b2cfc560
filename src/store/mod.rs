pub mod sqlite;

use async_trait::async_trait;

use crate::core::{Candidate, ValidCandidate};
use crate::error::Result;

pub use sqlite::SqliteStore;

/// Trait for candidate persistence backends
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Insert a validated candidate, returning it with its assigned id
    async fn insert(&self, candidate: &ValidCandidate) -> Result<Candidate>;

    async fn get(&self, id: i64) -> Result<Option<Candidate>>;

    /// All candidates ordered by id
    async fn list(&self) -> Result<Vec<Candidate>>;

    /// Overwrite a stored candidate; false if the id does not exist
    async fn update(&self, candidate: &Candidate) -> Result<bool>;

    /// Remove a candidate; false if the id does not exist
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Whether another candidate already uses `email`
    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool>;

    async fn count(&self) -> Result<u64>;
}
