use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditFields, SoftDelete};
use crate::catalog::CompanyType;
use crate::error::CoreResult;
use crate::store::Entity;

/// A counterparty — client, supplier, or both (§3 "Company"). Soft-deletable:
/// a company with documents cannot be hard-deleted (§3 relationships), so
/// deactivation goes through `is_deleted` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(flatten)]
    pub audit: AuditFields,
    #[serde(flatten)]
    pub soft_delete: SoftDelete,
    pub name: String,
    /// Unique, three uppercase ASCII letters.
    pub trigram: String,
    pub company_type: CompanyType,
    pub country_code: Option<String>,
    pub city_code: Option<String>,
    pub main_address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// EU intracommunity VAT string, distinct from any Chilean RUT.
    pub vat_id: Option<String>,
}

impl Entity for Company {
    fn kind() -> &'static str {
        "company"
    }

    fn id(&self) -> i64 {
        self.audit.id
    }

    fn set_id(&mut self, id: i64) {
        self.audit.id = id;
    }

    fn touch_created(&mut self, now: DateTime<Utc>, by: i64) {
        self.audit = AuditFields::new(now, by);
    }

    fn touch_updated(&mut self, now: DateTime<Utc>, by: i64) {
        self.audit.touch(now, by);
    }

    fn mark_deleted(&mut self, now: DateTime<Utc>, by: i64) -> CoreResult<()> {
        self.soft_delete = SoftDelete { is_deleted: true, deleted_at: Some(now), deleted_by: Some(by) };
        self.audit.touch(now, by);
        Ok(())
    }
}

/// One of potentially many Chilean tax identifiers for a [`Company`]
/// (§3 "CompanyRut"). `is_main` is a service-level convention, not a
/// schema-enforced invariant (§10 Open Question #1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRut {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub company_id: i64,
    /// Normalized `NNNNNNNN-D` form.
    pub rut: String,
    pub is_main: bool,
}

impl Entity for CompanyRut {
    fn kind() -> &'static str {
        "company_rut"
    }

    fn id(&self) -> i64 {
        self.audit.id
    }

    fn set_id(&mut self, id: i64) {
        self.audit.id = id;
    }

    fn touch_created(&mut self, now: DateTime<Utc>, by: i64) {
        self.audit = AuditFields::new(now, by);
    }

    fn touch_updated(&mut self, now: DateTime<Utc>, by: i64) {
        self.audit.touch(now, by);
    }
}
