use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// Human operator of the system (§3 "Principal"). Owned by no one; its
/// lifetime spans the organization's, not any single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Lowercase, unique.
    pub username: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    /// Exactly three uppercase ASCII letters when present.
    pub trigram: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub is_admin: bool,
}

impl Entity for Principal {
    fn kind() -> &'static str {
        "principal"
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
