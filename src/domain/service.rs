use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// A department name, globally unique (§3 "Service", e.g. "Ventas",
/// "Adquisiciones"). Distinct from the document/business-logic
/// `services` layer — this is the domain entity a [`super::Contact`] may
/// optionally belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub name: String,
}

impl Entity for Service {
    fn kind() -> &'static str {
        "service"
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
