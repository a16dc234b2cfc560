//! # Candidate Registry
//!
//! Candidate record management with a tiered name-search ranking engine:
//! - SQLite persistence with unique emails
//! - Per-field validation (`Validator` capability)
//! - Deterministic multi-criterion name ranking
//! - Multiple interfaces: Rust library, HTTP API, CLI, Python bindings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use candidate_registry::{CandidateService, NewCandidate};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = CandidateService::new("candidates.db").await?;
//!
//!     service
//!         .create(NewCandidate::new("Mary Jane Watson", 27, "F", "mj@example.com", "5550101234"))
//!         .await?;
//!
//!     for candidate in service.search("mary watson").await? {
//!         println!("{} <{}>", candidate.name, candidate.email);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The ranking engine can also be used on its own over any pool of names:
//!
//! ```rust
//! use candidate_registry::ranking::{rank, TieredNameRanker};
//!
//! let pool = ["Zed Young", "Amy Young", "Bob Stone"];
//! let ranked = rank(&TieredNameRanker::new(), "young", &pool).unwrap();
//! assert_eq!(ranked, vec![&"Amy Young", &"Zed Young"]);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod ranking;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(feature = "server")]
pub mod api;

// Re-export primary types
pub use config::ServiceConfig;
pub use crate::core::{ApiResponse, Candidate, CandidateUpdate, Gender, NewCandidate};
pub use error::{RegistryError, Result};
pub use ranking::{Ranker, RankingStrategy, TieredNameRanker, WordOverlapRanker};
pub use service::CandidateService;
pub use store::{CandidateStore, SqliteStore};
pub use validation::{FieldRules, ValidationErrors, Validator};

// Python bindings
#[cfg(feature = "python")]
pub mod python;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
