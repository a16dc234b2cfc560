pub mod tiered;
pub mod tokens;
pub mod word_overlap;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::Candidate;
use crate::error::{RegistryError, Result};

pub use tiered::{ScoreVector, TieredNameRanker, TwoWordCombo};
pub use tokens::QueryTokens;
pub use word_overlap::WordOverlapRanker;

/// Trait for name-search ranking implementations
pub trait Ranker: Send + Sync {
    /// Filter and order `names` against `query`.
    ///
    /// Returns indices into `names`, best match first. Indices of names
    /// removed by the filter are absent.
    fn rank_indices(&self, query: &str, names: &[&str]) -> Result<Vec<usize>>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}

/// Read-only name view of a pool member
pub trait Searchable {
    fn search_name(&self) -> &str;
}

impl Searchable for Candidate {
    fn search_name(&self) -> &str {
        &self.name
    }
}

impl Searchable for String {
    fn search_name(&self) -> &str {
        self
    }
}

impl Searchable for str {
    fn search_name(&self) -> &str {
        self
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_name(&self) -> &str {
        (**self).search_name()
    }
}

/// Rank a pool, returning references into it in ranked order.
///
/// The pool is only reordered and filtered, never copied or mutated.
pub fn rank<'a, R, T>(ranker: &R, query: &str, pool: &'a [T]) -> Result<Vec<&'a T>>
where
    R: Ranker + ?Sized,
    T: Searchable,
{
    let names: Vec<&str> = pool.iter().map(Searchable::search_name).collect();
    let order = ranker.rank_indices(query, &names)?;
    Ok(order.into_iter().map(|idx| &pool[idx]).collect())
}

/// Selectable ranking strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingStrategy {
    #[default]
    Tiered,
    WordOverlap,
}

impl RankingStrategy {
    pub fn build(&self) -> Arc<dyn Ranker> {
        match self {
            RankingStrategy::Tiered => Arc::new(TieredNameRanker::new()),
            RankingStrategy::WordOverlap => Arc::new(WordOverlapRanker::new()),
        }
    }
}

impl FromStr for RankingStrategy {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tiered" => Ok(RankingStrategy::Tiered),
            "word_overlap" | "word-overlap" => Ok(RankingStrategy::WordOverlap),
            other => Err(RegistryError::Config(format!("unknown ranker '{}'", other))),
        }
    }
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingStrategy::Tiered => f.write_str("tiered"),
            RankingStrategy::WordOverlap => f.write_str("word_overlap"),
        }
    }
}
