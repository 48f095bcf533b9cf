//! Generic repository layer (§4.6) plus specialized per-aggregate finders.
//!
//! A [`Repository`] is instantiated per aggregate type, borrowing the
//! corresponding table from the unit-of-work's store. Every write stamps
//! audit fields from the unit-of-work's [`AuditContext`]; reads never
//! touch it.

mod company;
mod product;
mod service;

pub use company::CompanyRepository;
pub use product::ProductRepository;
pub use service::ServiceRepository;

use std::sync::Mutex;

use crate::audit::AuditContext;
use crate::error::{CoreError, CoreResult};
use crate::store::{Entity, Table};

/// Ordering and pagination parameters for [`Repository::find`], mirroring
/// the generic repository's `find(filters, order_by, descending, skip,
/// limit)` contract (§4.6). Sorting on an arbitrary field name requires a
/// `key` extractor per call site rather than stringly-typed field lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub skip: usize,
    pub limit: Option<usize>,
}

impl Page {
    pub fn apply<T>(self, mut rows: Vec<T>) -> Vec<T> {
        if self.skip >= rows.len() {
            return Vec::new();
        }
        rows.drain(..self.skip);
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }
}

/// CRUD + audit-stamping over one aggregate's table (§4.6).
pub struct Repository<'a, T: Entity> {
    table: &'a Mutex<Table<T>>,
}

impl<'a, T: Entity> Repository<'a, T> {
    pub fn new(table: &'a Mutex<Table<T>>) -> Self {
        Repository { table }
    }

    pub fn get(&self, id: i64) -> CoreResult<T> {
        self.lock().get(id).ok_or_else(|| CoreError::not_found(T::kind(), id))
    }

    pub fn get_many(&self, ids: &[i64]) -> Vec<T> {
        self.lock().get_many(ids)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.lock().exists(id)
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    /// Thin linear scan filtered by `predicate`, then paginated. Adequate
    /// for the in-memory reference store; a host-backed implementation
    /// would push the filter down to its query engine.
    pub fn find(&self, predicate: impl Fn(&T) -> bool, page: Page) -> Vec<T> {
        let matches: Vec<T> = self.lock().iter().filter(|row| predicate(row)).cloned().collect();
        page.apply(matches)
    }

    pub fn create(&self, mut entity: T, audit: &AuditContext) -> CoreResult<T> {
        entity.touch_created(audit.now(), audit.user_id());
        let saved = self.lock().insert(entity);
        tracing::info!(entity = T::kind(), id = saved.id(), user_id = audit.user_id(), "created");
        Ok(saved)
    }

    pub fn create_many(&self, entities: Vec<T>, audit: &AuditContext) -> CoreResult<Vec<T>> {
        entities.into_iter().map(|e| self.create(e, audit)).collect()
    }

    pub fn update(&self, mut entity: T, audit: &AuditContext) -> CoreResult<T> {
        entity.touch_updated(audit.now(), audit.user_id());
        let saved = self.lock().update(entity)?;
        tracing::info!(entity = T::kind(), id = saved.id(), user_id = audit.user_id(), "updated");
        Ok(saved)
    }

    pub fn update_many(&self, entities: Vec<T>, audit: &AuditContext) -> CoreResult<usize> {
        let mut count = 0;
        for entity in entities {
            self.update(entity, audit)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn delete(&self, id: i64) -> CoreResult<()> {
        self.lock().delete(id)?;
        tracing::info!(entity = T::kind(), id, "deleted");
        Ok(())
    }

    pub fn delete_many(&self, ids: &[i64]) -> CoreResult<usize> {
        let mut count = 0;
        for id in ids {
            self.delete(*id)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn soft_delete(&self, id: i64, audit: &AuditContext) -> CoreResult<T> {
        let mut entity = self.get(id)?;
        entity.mark_deleted(audit.now(), audit.user_id())?;
        let saved = self.lock().update(entity)?;
        tracing::warn!(entity = T::kind(), id, user_id = audit.user_id(), "soft deleted");
        Ok(saved)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table<T>> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}
