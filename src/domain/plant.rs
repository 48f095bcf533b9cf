use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// A physical site of a [`super::Company`] (§3 "Plant"). Cascade-deleted
/// with its owning company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub company_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city_code: Option<String>,
}

impl Entity for Plant {
    fn kind() -> &'static str {
        "plant"
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
