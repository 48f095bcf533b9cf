use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// A person at a [`super::Company`] (§3 "Contact"). Cascade-deleted with
/// the company; `service_id` is set-null on delete of the referenced
/// [`super::Service`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub company_id: i64,
    pub service_id: Option<i64>,
    pub given_name: String,
    pub family_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub position: Option<String>,
}

impl Entity for Contact {
    fn kind() -> &'static str {
        "contact"
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
