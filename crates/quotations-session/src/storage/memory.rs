//! In-memory quotation storage.

use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use quotations_core::{Quotation, QuotationStorage, StorageError, default_quotations};

/// In-memory storage implementation.
///
/// Entries live for the lifetime of the storage value and are lost on
/// restart. Seeding copies the default list, so no two sessions share a
/// list and the defaults themselves are never touched.
pub struct MemoryStorage {
    sessions: RwLock<HashMap<String, Vec<Quotation>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuotationStorage for MemoryStorage {
    async fn get(&self, session: &str) -> Result<Option<Vec<Quotation>>, StorageError> {
        Ok(self
            .sessions
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?
            .get(session)
            .cloned())
    }

    async fn ensure_seeded(&self, session: &str) -> Result<Vec<Quotation>, StorageError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        let quotations = sessions.entry(session.to_owned()).or_insert_with(|| {
            tracing::debug!(session, "Seeding session with default quotations");
            default_quotations().to_vec()
        });

        Ok(quotations.clone())
    }

    async fn replace(
        &self,
        session: &str,
        quotations: Vec<Quotation>,
    ) -> Result<(), StorageError> {
        tracing::debug!(session, len = quotations.len(), "Replacing session quotations");

        self.sessions
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?
            .insert(session.to_owned(), quotations);

        Ok(())
    }

    async fn session_count(&self) -> Result<usize, StorageError> {
        Ok(self
            .sessions
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?
            .len())
    }
}
