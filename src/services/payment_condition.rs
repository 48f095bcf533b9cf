//! Payment condition template service (§4.4.5) — `code` uniqueness plus
//! the three-percentage invariant the domain type itself validates.

use crate::audit::AuditContext;
use crate::domain::PaymentCondition;
use crate::error::{CoreError, CoreResult};
use crate::repository::Repository;
use crate::store::{Entity, InMemoryStore};

pub struct PaymentConditionService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> PaymentConditionService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        PaymentConditionService { store }
    }

    fn inner(&self) -> Repository<'a, PaymentCondition> {
        Repository::new(&self.store.payment_conditions)
    }

    pub fn get(&self, id: i64) -> CoreResult<PaymentCondition> {
        self.inner().get(id)
    }

    pub fn create(&self, condition: PaymentCondition, audit: &AuditContext) -> CoreResult<PaymentCondition> {
        condition.validate_percentages()?;
        self.reserve_code(&condition.code)?;
        self.inner().create(condition, audit)
    }

    pub fn update(&self, condition: PaymentCondition, audit: &AuditContext) -> CoreResult<PaymentCondition> {
        condition.validate_percentages()?;
        let previous = self.inner().get(condition.id())?;
        if previous.code != condition.code {
            self.reserve_code(&condition.code)?;
            self.release_code(&previous.code);
        }
        self.inner().update(condition, audit)
    }

    fn reserve_code(&self, code: &str) -> CoreResult<()> {
        let mut index = self.store.payment_condition_code_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(code.to_string()) {
            return Err(CoreError::conflict(format!("payment condition code already in use: {code}"))
                .with_detail("code", code));
        }
        Ok(())
    }

    fn release_code(&self, code: &str) {
        self.store.payment_condition_code_index.lock().unwrap_or_else(|e| e.into_inner()).remove(code);
    }
}
