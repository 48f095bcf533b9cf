use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// A materialized view of a sequence bucket's counter, kept for
/// introspection and reporting (§3 "Sequence"). The generator itself is
/// backed by [`crate::store::SequenceLockStore`], which owns the live
/// locking semantics; this row is the durable projection of its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub name: String,
    pub year: i32,
    pub prefix: Option<String>,
    pub last_value: i64,
}

impl Entity for Sequence {
    fn kind() -> &'static str {
        "sequence"
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
