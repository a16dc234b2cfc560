use std::sync::Arc;
use std::time::Instant;

use crate::core::{Candidate, CandidateUpdate, NewCandidate};
use crate::error::{RegistryError, Result};
use crate::ranking::{self, Ranker, RankingStrategy};
use crate::store::{CandidateStore, SqliteStore};
use crate::validation::{self, FieldRules, ValidationErrors, Validator};

/// Candidate record service: validation, persistence and name search
pub struct CandidateService {
    store: Arc<dyn CandidateStore>,
    ranker: Arc<dyn Ranker>,
    validator: Arc<dyn Validator>,
}

impl CandidateService {
    /// Create service with a SQLite store and the default ranker
    pub async fn new(db_path: impl AsRef<str>) -> Result<Self> {
        Self::with_strategy(db_path, RankingStrategy::default()).await
    }

    /// Create service with a SQLite store and the given ranking strategy
    pub async fn with_strategy(db_path: impl AsRef<str>, strategy: RankingStrategy) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(db_path.as_ref()).await?);
        tracing::info!("✅ Candidate service ready (ranker: {})", strategy);

        Ok(Self::from_parts(store, strategy.build(), Arc::new(FieldRules::new())))
    }

    /// Assemble from explicit collaborators
    pub fn from_parts(
        store: Arc<dyn CandidateStore>,
        ranker: Arc<dyn Ranker>,
        validator: Arc<dyn Validator>,
    ) -> Self {
        Self {
            store,
            ranker,
            validator,
        }
    }

    pub fn ranker_name(&self) -> &str {
        self.ranker.name()
    }

    /// Validate and store a new candidate
    pub async fn create(&self, payload: NewCandidate) -> Result<Candidate> {
        let valid = validation::validate_new(self.validator.as_ref(), &payload)?;

        if self.store.email_exists(&valid.email, None).await? {
            return Err(email_taken());
        }

        let candidate = self.store.insert(&valid).await?;
        tracing::info!("Created candidate {}", candidate.display_name());

        Ok(candidate)
    }

    pub async fn get(&self, id: i64) -> Result<Candidate> {
        self.store.get(id).await?.ok_or(RegistryError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        self.store.list().await
    }

    /// Apply the fields present in `payload` to an existing candidate
    pub async fn update(&self, id: i64, payload: CandidateUpdate) -> Result<Candidate> {
        let existing = self.get(id).await?;
        let valid = validation::validate_update(self.validator.as_ref(), &payload)?;

        if let Some(email) = &valid.email {
            if self.store.email_exists(email, Some(id)).await? {
                return Err(email_taken());
            }
        }

        let updated = existing.merged(valid);
        if !self.store.update(&updated).await? {
            return Err(RegistryError::NotFound(id));
        }

        tracing::info!("Updated candidate {}", updated.display_name());
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(RegistryError::NotFound(id));
        }
        tracing::info!("Deleted candidate #{}", id);
        Ok(())
    }

    /// Rank stored candidates against a free-text name query
    pub async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let start = Instant::now();

        // reject before touching the store
        ranking::QueryTokens::parse(query)?;

        let pool = self.store.list().await?;
        let ranked: Vec<Candidate> = ranking::rank(self.ranker.as_ref(), query, &pool)?
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(
            "Search '{}' → {}/{} candidates via {} ({:.2}ms)",
            query,
            ranked.len(),
            pool.len(),
            self.ranker.name(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(ranked)
    }

    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }
}

fn email_taken() -> RegistryError {
    RegistryError::Validation(ValidationErrors::single("email", "Email already exists"))
}
