use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// Known `entity_type` values for [`Note::entity_type`]. Unrelated kinds
/// are accepted with a logged warning rather than rejected (§3 "Note").
pub const KNOWN_NOTE_ENTITY_TYPES: &[&str] =
    &["company", "product", "quote", "order", "invoice", "contact", "address", "plant"];

/// Priority of a [`Note`], default `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NotePriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl NotePriority {
    pub fn code(self) -> &'static str {
        match self {
            NotePriority::Low => "LOW",
            NotePriority::Normal => "NORMAL",
            NotePriority::High => "HIGH",
            NotePriority::Urgent => "URGENT",
        }
    }
}

/// Polymorphic annotation attachable to any aggregate (§3 "Note").
/// Never cascade-deleted with its target — the caller is responsible
/// (§10 Open Question #2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Normalized lowercase; see [`KNOWN_NOTE_ENTITY_TYPES`].
    pub entity_type: String,
    pub entity_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub priority: NotePriority,
    pub category: Option<String>,
}

impl Entity for Note {
    fn kind() -> &'static str {
        "note"
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
