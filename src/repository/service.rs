use crate::audit::AuditContext;
use crate::domain::Service;
use crate::error::{CoreError, CoreResult};
use crate::store::{Entity, InMemoryStore};

use super::{Page, Repository};

/// Service (department) repository: CRUD plus the `name`-uniqueness
/// invariant (§3 "Service": "a department name globally unique") that the
/// generic [`Repository`] has no field-specific knowledge of.
pub struct ServiceRepository<'a> {
    inner: Repository<'a, Service>,
    store: &'a InMemoryStore,
}

impl<'a> ServiceRepository<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        ServiceRepository { inner: Repository::new(&store.services), store }
    }

    pub fn get(&self, id: i64) -> CoreResult<Service> {
        self.inner.get(id)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.inner.exists(id)
    }

    /// Thin query; never mutates (§4.6).
    pub fn find_by_name(&self, name: &str) -> Option<Service> {
        self.inner.find(|s| s.name == name, Page { skip: 0, limit: Some(1) }).into_iter().next()
    }

    pub fn create(&self, service: Service, audit: &AuditContext) -> CoreResult<Service> {
        self.reserve_name(&service.name)?;
        self.inner.create(service, audit)
    }

    pub fn update(&self, service: Service, audit: &AuditContext) -> CoreResult<Service> {
        let previous = self.inner.get(service.id())?;
        if previous.name != service.name {
            self.reserve_name(&service.name)?;
            self.release_name(&previous.name);
        }
        self.inner.update(service, audit)
    }

    fn reserve_name(&self, name: &str) -> CoreResult<()> {
        let mut index = self.store.service_name_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(name.to_string()) {
            return Err(CoreError::conflict(format!("service name already in use: {name}")).with_detail("name", name));
        }
        Ok(())
    }

    fn release_name(&self, name: &str) {
        self.store.service_name_index.lock().unwrap_or_else(|e| e.into_inner()).remove(name);
    }

    pub fn delete(&self, id: i64) -> CoreResult<()> {
        let service = self.inner.get(id)?;
        self.inner.delete(id)?;
        self.release_name(&service.name);
        Ok(())
    }
}
