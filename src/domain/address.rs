use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::catalog::AddressType;
use crate::store::Entity;

/// A postal address attached to a [`super::Company`] (§3 "Address").
/// At most one per company may have `is_default = true`; the service
/// layer enforces "clear previous, then set" when a new default is
/// chosen (§10 Open Question #4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub company_id: i64,
    pub address_type: AddressType,
    pub street: String,
    pub city_code: Option<String>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
    pub is_default: bool,
}

impl Entity for Address {
    fn kind() -> &'static str {
        "address"
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
