//! Session request handling: list, create and delete quotations.

use std::{collections::HashMap, sync::Arc};

use quotations_core::{
    IdPolicy, LengthPlusOne, NewQuotation, Quotation, QuotationId, QuotationStorage, StorageError,
    default_quotations,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Quotation service error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Per-session quotation lists on top of a storage backend.
///
/// Reads never create a storage entry. Create and delete seed the session
/// first, then do a read-modify-replace that is serialized per session key.
pub struct QuotationService<S>
where
    S: QuotationStorage,
{
    storage: S,
    id_policy: Box<dyn IdPolicy>,
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S> QuotationService<S>
where
    S: QuotationStorage,
{
    /// Create a service using length-based id assignment.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            id_policy: Box::new(LengthPlusOne),
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the id assignment policy.
    #[must_use]
    pub fn with_id_policy(mut self, id_policy: impl IdPolicy + 'static) -> Self {
        self.id_policy = Box::new(id_policy);
        self
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Name of the active id policy.
    #[must_use]
    pub fn id_policy_name(&self) -> &'static str {
        self.id_policy.name()
    }

    /// List a session's quotations, or the defaults for an unseen session.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub async fn list(&self, session: &str) -> Result<Vec<Quotation>, ServiceError> {
        let quotations = self
            .storage
            .get(session)
            .await?
            .unwrap_or_else(|| default_quotations().to_vec());

        tracing::debug!(session, len = quotations.len(), "Listed quotations");
        Ok(quotations)
    }

    /// Append a new quotation to a session and return it.
    ///
    /// Duplicate text/author pairs are allowed.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub async fn create(
        &self,
        session: &str,
        new: NewQuotation,
    ) -> Result<Quotation, ServiceError> {
        let _guard = self.lock_session(session).await;

        let mut quotations = self.storage.ensure_seeded(session).await?;
        let quotation = new.into_quotation(self.id_policy.next_id(&quotations));
        quotations.push(quotation.clone());
        self.storage.replace(session, quotations).await?;

        tracing::debug!(session, id = quotation.id, "Created quotation");
        Ok(quotation)
    }

    /// Remove every quotation with `id` from a session.
    ///
    /// Succeeds whether or not anything matched.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub async fn delete(&self, session: &str, id: QuotationId) -> Result<(), ServiceError> {
        let _guard = self.lock_session(session).await;

        let mut quotations = self.storage.ensure_seeded(session).await?;
        let before = quotations.len();
        quotations.retain(|q| q.id != id);
        let removed = before - quotations.len();
        self.storage.replace(session, quotations).await?;

        tracing::debug!(session, id, removed, "Deleted quotation");
        Ok(())
    }

    async fn lock_session(&self, session: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.session_locks.lock().await;
            Arc::clone(locks.entry(session.to_owned()).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use quotations_core::MaxPlusOne;

    use super::*;
    use crate::storage::MemoryStorage;

    fn service() -> QuotationService<MemoryStorage> {
        QuotationService::new(MemoryStorage::new())
    }

    fn ids(quotations: &[Quotation]) -> Vec<QuotationId> {
        quotations.iter().map(|q| q.id).collect()
    }

    #[tokio::test]
    async fn test_list_unseen_session_returns_defaults() {
        let svc = service();
        assert_eq!(svc.list("fresh").await.unwrap(), default_quotations());
        assert_eq!(svc.list("fresh").await.unwrap(), default_quotations());
        assert_eq!(svc.storage().session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_seeds_and_appends() {
        let svc = service();
        let created = svc
            .create("k", NewQuotation::new("Hello", "World"))
            .await
            .unwrap();

        assert_eq!(created.id, 6);
        assert!(!created.is_sticky);
        assert_eq!(created.text, "Hello");
        assert_eq!(created.author, "World");

        let list = svc.list("k").await.unwrap();
        assert_eq!(list.len(), 6);
        assert_eq!(&list[..5], default_quotations());
        assert_eq!(list[5], created);
    }

    #[tokio::test]
    async fn test_create_keeps_sticky_flag() {
        let svc = service();
        let created = svc
            .create("k", NewQuotation::new("t", "a").sticky(true))
            .await
            .unwrap();
        assert!(created.is_sticky);
    }

    #[tokio::test]
    async fn test_create_allows_duplicates() {
        let svc = service();
        let a = svc.create("k", NewQuotation::new("t", "a")).await.unwrap();
        let b = svc.create("k", NewQuotation::new("t", "a")).await.unwrap();
        assert_eq!((a.id, b.id), (6, 7));
        assert_eq!(svc.list("k").await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_mutations_do_not_leak_across_sessions() {
        let svc = service();
        svc.create("k", NewQuotation::new("t", "a")).await.unwrap();
        svc.delete("k", 1).await.unwrap();

        assert_eq!(svc.list("other").await.unwrap(), default_quotations());
        assert_eq!(default_quotations().len(), 5);
        assert_eq!(ids(&svc.list("k").await.unwrap()), vec![2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_delete_present_id() {
        let svc = service();
        svc.delete("k", 3).await.unwrap();

        let list = svc.list("k").await.unwrap();
        assert_eq!(ids(&list), vec![1, 2, 4, 5]);
        assert_eq!(svc.storage().session_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let svc = service();
        svc.delete("k", 42).await.unwrap();
        assert_eq!(svc.list("k").await.unwrap(), default_quotations());

        svc.delete("k", 2).await.unwrap();
        svc.delete("k", 2).await.unwrap();
        assert_eq!(ids(&svc.list("k").await.unwrap()), vec![1, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_length_based_id_collides_after_delete() {
        let svc = service();
        let a = svc.create("k", NewQuotation::new("A", "a")).await.unwrap();
        svc.delete("k", 5).await.unwrap();
        let b = svc.create("k", NewQuotation::new("B", "b")).await.unwrap();

        // 5 records remain after the delete, so B gets 6, which A already has.
        assert_eq!(a.id, 6);
        assert_eq!(b.id, 6);
        let list = svc.list("k").await.unwrap();
        assert_eq!(ids(&list), vec![1, 2, 3, 4, 6, 6]);

        // Deleting a duplicated id removes every match.
        svc.delete("k", 6).await.unwrap();
        assert_eq!(ids(&svc.list("k").await.unwrap()), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_max_policy_avoids_collision() {
        let svc = service().with_id_policy(MaxPlusOne);
        assert_eq!(svc.id_policy_name(), "max");

        svc.create("k", NewQuotation::new("A", "a")).await.unwrap();
        svc.delete("k", 5).await.unwrap();
        let b = svc.create("k", NewQuotation::new("B", "b")).await.unwrap();
        assert_eq!(b.id, 7);
    }

    /// Yields after reading the seeded list, so an unguarded
    /// read-modify-replace interleaves with other writers.
    struct YieldingStorage(MemoryStorage);

    #[async_trait::async_trait]
    impl QuotationStorage for YieldingStorage {
        async fn get(&self, session: &str) -> Result<Option<Vec<Quotation>>, StorageError> {
            self.0.get(session).await
        }

        async fn ensure_seeded(&self, session: &str) -> Result<Vec<Quotation>, StorageError> {
            let quotations = self.0.ensure_seeded(session).await?;
            tokio::task::yield_now().await;
            Ok(quotations)
        }

        async fn replace(
            &self,
            session: &str,
            quotations: Vec<Quotation>,
        ) -> Result<(), StorageError> {
            self.0.replace(session, quotations).await
        }

        async fn session_count(&self) -> Result<usize, StorageError> {
            self.0.session_count().await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_serialized() {
        let svc = Arc::new(QuotationService::new(YieldingStorage(MemoryStorage::new())));
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move {
                    svc.create("k", NewQuotation::new(format!("q{i}"), "a"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let mut got = ids(&svc.list("k").await.unwrap());
        assert_eq!(got.len(), 25);
        got.sort_unstable();
        got.dedup();
        assert_eq!(got, (1..=25).collect::<Vec<_>>());
    }
}
