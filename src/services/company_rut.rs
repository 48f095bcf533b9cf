//! CompanyRut service (§10 Open Question #1) — `is_main` is a
//! service-level convention: setting a new main RUT clears the previous
//! one, the same "clear previous, then set" shape as [`super::address`].
//! `rut` itself is globally unique across all companies (§3 "CompanyRut"),
//! reserved the same way `CompanyRepository` reserves `trigram`.

use crate::audit::AuditContext;
use crate::domain::CompanyRut;
use crate::error::{CoreError, CoreResult};
use crate::repository::{Page, Repository};
use crate::store::{Entity, InMemoryStore};

pub struct CompanyRutService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> CompanyRutService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        CompanyRutService { store }
    }

    fn inner(&self) -> Repository<'a, CompanyRut> {
        Repository::new(&self.store.company_ruts)
    }

    pub fn get(&self, id: i64) -> CoreResult<CompanyRut> {
        self.inner().get(id)
    }

    pub fn for_company(&self, company_id: i64) -> Vec<CompanyRut> {
        self.inner().find(|r| r.company_id == company_id, Page::default())
    }

    pub fn create(&self, mut rut: CompanyRut, audit: &AuditContext) -> CoreResult<CompanyRut> {
        self.reserve_rut(&rut.rut)?;
        if rut.is_main {
            self.clear_main(rut.company_id, audit)?;
        } else if self.for_company(rut.company_id).is_empty() {
            rut.is_main = true;
        }
        self.inner().create(rut, audit)
    }

    pub fn update(&self, rut: CompanyRut, audit: &AuditContext) -> CoreResult<CompanyRut> {
        let previous = self.inner().get(rut.id())?;
        if previous.rut != rut.rut {
            self.reserve_rut(&rut.rut)?;
            self.release_rut(&previous.rut);
        }
        self.inner().update(rut, audit)
    }

    pub fn set_main(&self, rut_id: i64, audit: &AuditContext) -> CoreResult<CompanyRut> {
        let rut = self.inner().get(rut_id)?;
        self.clear_main(rut.company_id, audit)?;
        let mut rut = self.inner().get(rut_id)?;
        rut.is_main = true;
        self.inner().update(rut, audit)
    }

    fn clear_main(&self, company_id: i64, audit: &AuditContext) -> CoreResult<()> {
        for mut existing in self.for_company(company_id) {
            if existing.is_main {
                existing.is_main = false;
                self.inner().update(existing, audit)?;
            }
        }
        Ok(())
    }

    fn reserve_rut(&self, rut: &str) -> CoreResult<()> {
        let mut index = self.store.rut_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(rut.to_string()) {
            return Err(CoreError::conflict(format!("RUT already in use: {rut}")).with_detail("rut", rut));
        }
        Ok(())
    }

    fn release_rut(&self, rut: &str) {
        self.store.rut_index.lock().unwrap_or_else(|e| e.into_inner()).remove(rut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::domain::AuditFields;
    use chrono::Utc;
    use std::sync::Arc;

    fn audit() -> AuditContext {
        AuditContext::new(1, Arc::new(SystemClock))
    }

    fn rut(company_id: i64, value: &str, is_main: bool) -> CompanyRut {
        CompanyRut { audit: AuditFields::new(Utc::now(), 1), company_id, rut: value.to_string(), is_main }
    }

    #[test]
    fn setting_a_new_main_rut_clears_the_previous_one() {
        let store = InMemoryStore::default();
        let service = CompanyRutService::new(&store);
        let first = service.create(rut(1, "76543210-5", true), &audit()).unwrap();
        let second = service.create(rut(1, "76543210-6", true), &audit()).unwrap();

        assert!(!service.get(first.id()).unwrap().is_main);
        assert!(second.is_main);
    }

    #[test]
    fn rut_must_be_globally_unique_across_companies() {
        let store = InMemoryStore::default();
        let service = CompanyRutService::new(&store);
        service.create(rut(1, "76543210-5", true), &audit()).unwrap();

        let duplicate = service.create(rut(2, "76543210-5", true), &audit());
        assert!(duplicate.is_err());
    }

    #[test]
    fn updating_the_rut_value_releases_the_old_reservation() {
        let store = InMemoryStore::default();
        let service = CompanyRutService::new(&store);
        let created = service.create(rut(1, "76543210-5", true), &audit()).unwrap();

        let mut changed = created.clone();
        changed.rut = "11111111-1".to_string();
        service.update(changed, &audit()).unwrap();

        // The old value is free again for another company.
        service.create(rut(2, "76543210-5", false), &audit()).unwrap();
    }
}
