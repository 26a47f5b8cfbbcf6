//! Storage trait for session-keyed quotation lists.

use async_trait::async_trait;
use thiserror::Error;

use crate::Quotation;

/// Storage error.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Internal(String),
}

/// Trait for quotation storage backends.
///
/// Session keys are opaque: no format checks, no expiry. Entries only ever
/// come into existence through [`QuotationStorage::ensure_seeded`].
#[async_trait]
pub trait QuotationStorage: Send + Sync {
    /// Current list for a session, or `None` if the session was never seeded.
    async fn get(&self, session: &str) -> Result<Option<Vec<Quotation>>, StorageError>;

    /// Seed the session with a copy of the default list if absent, then
    /// return its current list.
    async fn ensure_seeded(&self, session: &str) -> Result<Vec<Quotation>, StorageError>;

    /// Overwrite the session's whole list.
    async fn replace(&self, session: &str, quotations: Vec<Quotation>)
    -> Result<(), StorageError>;

    /// Number of sessions with an entry.
    async fn session_count(&self) -> Result<usize, StorageError>;
}
