use crate::audit::AuditContext;
use crate::domain::Company;
use crate::error::{CoreError, CoreResult};
use crate::store::{Entity, InMemoryStore};

use super::{Page, Repository};

/// Company repository: CRUD plus the trigram-uniqueness invariant (§3
/// "Company": "trigram globally unique") that the generic [`Repository`]
/// has no field-specific knowledge of.
pub struct CompanyRepository<'a> {
    inner: Repository<'a, Company>,
    store: &'a InMemoryStore,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        CompanyRepository { inner: Repository::new(&store.companies), store }
    }

    pub fn get(&self, id: i64) -> CoreResult<Company> {
        self.inner.get(id)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.inner.exists(id)
    }

    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// Thin query; never mutates (§4.6).
    pub fn find_by_trigram(&self, trigram: &str) -> Option<Company> {
        self.inner.find(|c| c.trigram == trigram, Page { skip: 0, limit: Some(1) }).into_iter().next()
    }

    pub fn find_active(&self, page: Page) -> Vec<Company> {
        self.inner.find(|c| !c.soft_delete.is_deleted, page)
    }

    pub fn create(&self, company: Company, audit: &AuditContext) -> CoreResult<Company> {
        self.reserve_trigram(&company.trigram)?;
        self.inner.create(company, audit)
    }

    pub fn update(&self, company: Company, audit: &AuditContext) -> CoreResult<Company> {
        let previous = self.inner.get(company.id())?;
        if previous.trigram != company.trigram {
            self.reserve_trigram(&company.trigram)?;
            self.release_trigram_value(&previous.trigram);
        }
        self.inner.update(company, audit)
    }

    fn reserve_trigram(&self, trigram: &str) -> CoreResult<()> {
        let mut index = self.store.trigram_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(trigram.to_string()) {
            return Err(CoreError::conflict(format!("trigram already in use: {trigram}")).with_detail("trigram", trigram));
        }
        Ok(())
    }

    fn release_trigram_value(&self, trigram: &str) {
        self.store.trigram_index.lock().unwrap_or_else(|e| e.into_inner()).remove(trigram);
    }

    pub fn soft_delete(&self, id: i64, audit: &AuditContext) -> CoreResult<Company> {
        self.inner.soft_delete(id, audit)
    }
}
