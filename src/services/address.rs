//! Address service (§10 Open Question #4) — enforces "clear previous,
//! then set" for `is_default` so at most one address per company carries
//! the flag.

use crate::audit::AuditContext;
use crate::domain::Address;
use crate::error::CoreResult;
use crate::repository::{Page, Repository};
use crate::store::{Entity, InMemoryStore};

pub struct AddressService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> AddressService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        AddressService { store }
    }

    fn inner(&self) -> Repository<'a, Address> {
        Repository::new(&self.store.addresses)
    }

    pub fn get(&self, id: i64) -> CoreResult<Address> {
        self.inner().get(id)
    }

    pub fn for_company(&self, company_id: i64) -> Vec<Address> {
        self.inner().find(|a| a.company_id == company_id, Page::default())
    }

    pub fn create(&self, mut address: Address, audit: &AuditContext) -> CoreResult<Address> {
        if address.is_default {
            self.clear_default(address.company_id, audit)?;
        } else if self.for_company(address.company_id).is_empty() {
            // The first address for a company is the default by convention.
            address.is_default = true;
        }
        self.inner().create(address, audit)
    }

    /// Set `address_id` as the company's default, clearing any previous
    /// default first.
    pub fn set_default(&self, address_id: i64, audit: &AuditContext) -> CoreResult<Address> {
        let address = self.inner().get(address_id)?;
        self.clear_default(address.company_id, audit)?;
        let mut address = self.inner().get(address_id)?;
        address.is_default = true;
        self.inner().update(address, audit)
    }

    fn clear_default(&self, company_id: i64, audit: &AuditContext) -> CoreResult<()> {
        for mut existing in self.for_company(company_id) {
            if existing.is_default {
                existing.is_default = false;
                self.inner().update(existing, audit)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AddressType;
    use crate::clock::SystemClock;
    use crate::domain::AuditFields;
    use chrono::Utc;
    use std::sync::Arc;

    fn audit() -> AuditContext {
        AuditContext::new(1, Arc::new(SystemClock))
    }

    fn address(company_id: i64, is_default: bool) -> Address {
        Address {
            audit: AuditFields::new(Utc::now(), 1),
            company_id,
            address_type: AddressType::Billing,
            street: "Av. Siempre Viva 742".to_string(),
            city_code: None,
            country_code: Some("CL".to_string()),
            postal_code: None,
            is_default,
        }
    }

    #[test]
    fn first_address_becomes_default_automatically() {
        let store = InMemoryStore::default();
        let service = AddressService::new(&store);
        let created = service.create(address(1, false), &audit()).unwrap();
        assert!(created.is_default);
    }

    #[test]
    fn setting_a_new_default_clears_the_previous_one() {
        let store = InMemoryStore::default();
        let service = AddressService::new(&store);
        let first = service.create(address(1, true), &audit()).unwrap();
        let second = service.create(address(1, true), &audit()).unwrap();

        let first_reloaded = service.get(first.id()).unwrap();
        assert!(!first_reloaded.is_default);
        assert!(second.is_default);

        let promoted = service.set_default(first_reloaded.id(), &audit()).unwrap();
        assert!(promoted.is_default);
        let second_reloaded = service.get(second.id()).unwrap();
        assert!(!second_reloaded.is_default);
    }
}
