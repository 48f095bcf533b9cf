//! Unit-of-work / transaction boundary (§4.2).
//!
//! Mirrors the reference core's preference for explicit, injectable
//! collaborators over ambient state: a [`UnitOfWork`] is constructed with
//! its [`crate::audit::AuditContext`] and a handle to the store, carries
//! any sequence numbers it reserves until `commit`/`rollback`, and rolls
//! back automatically via `Drop` if neither is called before it goes out
//! of scope — matching §7's "the unit-of-work catches everything via
//! `Drop`-based rollback-on-error".

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::audit::AuditContext;
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::sequence_generator::format_number;
use crate::store::{InMemoryStore, SequenceKey};

static NEXT_UOW_ID: AtomicU64 = AtomicU64::new(1);

/// A scoped transactional session bundling the store handle, audit
/// context, and clock (GLOSSARY "Unit-of-work").
pub struct UnitOfWork {
    id: u64,
    pub audit: AuditContext,
    store: Arc<InMemoryStore>,
    reserved: RefCell<HashMap<SequenceKey, u64>>,
    finished: Cell<bool>,
}

impl UnitOfWork {
    pub(crate) fn begin(store: Arc<InMemoryStore>, audit: AuditContext) -> Self {
        let id = NEXT_UOW_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(uow_id = id, user_id = audit.user_id(), "begin unit-of-work");
        UnitOfWork {
            id,
            audit,
            store,
            reserved: RefCell::new(HashMap::new()),
            finished: Cell::new(false),
        }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Reserve the next number in `(family, year, prefix)`'s bucket,
    /// holding the row lock until this unit-of-work's `commit`/`rollback`
    /// (§4.5). Calling this more than once for the same bucket within a
    /// single unit-of-work chains off the pending reservation rather than
    /// re-reading the committed value.
    pub fn generate_number(
        &self,
        config: &CoreConfig,
        family: &str,
        year: i32,
        prefix: Option<&str>,
    ) -> CoreResult<String> {
        let key = SequenceKey::new(family, year, prefix.map(str::to_string));
        let mut reserved = self.reserved.borrow_mut();
        let next = match reserved.get(&key) {
            Some(pending) => pending + 1,
            None => self.store.sequences.acquire(&key, self.id) + 1,
        };
        reserved.insert(key, next);
        drop(reserved);

        let family_code = config.family_code(family);
        let formatted = format_number(&family_code, prefix, year, next, config.sequence_padding);
        tracing::info!(uow_id = self.id, family, year, next, "reserved sequence number");
        Ok(formatted)
    }

    /// Write pending changes without committing. The in-memory reference
    /// store applies repository writes directly to its tables as they
    /// happen (see DESIGN.md); `flush` exists as the logging seam and
    /// extension point §4.2 names, for stores that do stage writes.
    pub fn flush(&self) -> CoreResult<()> {
        tracing::debug!(uow_id = self.id, "flush");
        Ok(())
    }

    /// Commit all reserved sequence numbers and end the session.
    pub fn commit(self) -> CoreResult<()> {
        for (key, value) in self.reserved.borrow().iter() {
            self.store.sequences.commit(key, self.id, *value);
        }
        self.finished.set(true);
        tracing::info!(uow_id = self.id, "commit");
        Ok(())
    }

    /// Discard all reserved sequence numbers and end the session.
    pub fn rollback(self) {
        for key in self.reserved.borrow().keys() {
            self.store.sequences.rollback(key, self.id);
        }
        self.finished.set(true);
        tracing::warn!(uow_id = self.id, "rollback");
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if !self.finished.get() {
            for key in self.reserved.borrow().keys() {
                self.store.sequences.rollback(key, self.id);
            }
            tracing::warn!(uow_id = self.id, "rollback on drop (neither commit nor rollback was called)");
        }
    }
}

/// Produces [`UnitOfWork`]s with transactional and row-locking semantics
/// (§6 "Store session factory").
pub struct Store {
    inner: Arc<InMemoryStore>,
}

impl Default for Store {
    fn default() -> Self {
        Store { inner: Arc::new(InMemoryStore::new()) }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, audit: AuditContext) -> UnitOfWork {
        UnitOfWork::begin(self.inner.clone(), audit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SystemClock};
    use chrono::Utc;
    use std::sync::Arc as StdArc;

    fn ctx(user_id: i64) -> AuditContext {
        AuditContext::new(user_id, StdArc::new(SystemClock))
    }

    #[test]
    fn rollback_releases_reserved_number_for_reissue() {
        let store = Store::new();
        let config = CoreConfig::default();

        let uow_a = store.begin(ctx(1));
        let first = uow_a.generate_number(&config, "quote", 2025, Some("AKG")).unwrap();
        assert_eq!(first, "C-AKG-2025-0001");
        uow_a.rollback();

        let uow_b = store.begin(ctx(2));
        let second = uow_b.generate_number(&config, "quote", 2025, Some("AKG")).unwrap();
        assert_eq!(second, "C-AKG-2025-0001");
        uow_b.commit().unwrap();
    }

    #[test]
    fn repeated_calls_within_one_uow_chain_off_pending_reservation() {
        let store = Store::new();
        let config = CoreConfig::default();
        let uow = store.begin(ctx(1));
        let first = uow.generate_number(&config, "order", 2025, None).unwrap();
        let second = uow.generate_number(&config, "order", 2025, None).unwrap();
        assert_eq!(first, "O-2025-0001");
        assert_eq!(second, "O-2025-0002");
        uow.commit().unwrap();
    }

    #[test]
    fn dropping_without_commit_rolls_back() {
        let store = Store::new();
        let config = CoreConfig::default();
        {
            let uow = store.begin(ctx(1));
            uow.generate_number(&config, "quote", 2025, Some("AKG")).unwrap();
        }
        let uow = store.begin(ctx(1));
        let reissued = uow.generate_number(&config, "quote", 2025, Some("AKG")).unwrap();
        assert_eq!(reissued, "C-AKG-2025-0001");
        uow.commit().unwrap();
    }

    #[test]
    fn audit_context_carries_through_the_session() {
        let fixed = chrono::DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let audit = AuditContext::new(42, StdArc::new(FixedClock(fixed)));
        let store = Store::new();
        let uow = store.begin(audit);
        assert_eq!(uow.audit.user_id(), 42);
        assert_eq!(uow.audit.now(), fixed);
        uow.commit().unwrap();
    }
}
