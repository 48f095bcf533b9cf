//! Note service (§3 "Note") — polymorphic annotation attachable to any
//! aggregate. `entity_type` is normalized to lowercase; unrecognized
//! kinds are accepted with a warning rather than rejected, since the
//! set of annotatable aggregates is expected to grow.

use tracing::warn;

use crate::audit::AuditContext;
use crate::domain::{Note, KNOWN_NOTE_ENTITY_TYPES};
use crate::error::{CoreError, CoreResult};
use crate::repository::{Page, Repository};
use crate::store::{Entity, InMemoryStore};

pub struct CreateNoteRequest {
    pub entity_type: String,
    pub entity_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub priority: crate::domain::NotePriority,
    pub category: Option<String>,
}

pub struct NoteService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> NoteService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        NoteService { store }
    }

    fn inner(&self) -> Repository<'a, Note> {
        Repository::new(&self.store.notes)
    }

    pub fn get(&self, id: i64) -> CoreResult<Note> {
        self.inner().get(id)
    }

    pub fn for_entity(&self, entity_type: &str, entity_id: i64) -> Vec<Note> {
        let entity_type = entity_type.to_lowercase();
        self.inner().find(|n| n.entity_type == entity_type && n.entity_id == entity_id, Page::default())
    }

    /// Typed counterpart to [`Self::for_entity`] (§10 design note #4):
    /// `notes.for_aggregate(&quote)` instead of a stringly-typed call site.
    pub fn for_aggregate<T: Entity>(&self, target: &T) -> Vec<Note> {
        self.for_entity(T::kind(), target.id())
    }

    /// Typed counterpart to [`Self::create`]: attaches a note to `target`
    /// without the caller naming its entity type directly.
    pub fn attach<T: Entity>(
        &self,
        target: &T,
        content: String,
        priority: crate::domain::NotePriority,
        audit: &AuditContext,
    ) -> CoreResult<Note> {
        self.create(
            CreateNoteRequest {
                entity_type: T::kind().to_string(),
                entity_id: target.id(),
                title: None,
                content,
                priority,
                category: None,
            },
            audit,
        )
    }

    pub fn create(&self, request: CreateNoteRequest, audit: &AuditContext) -> CoreResult<Note> {
        if request.content.trim().is_empty() {
            return Err(CoreError::invalid("content", "must not be empty"));
        }
        if request.entity_id <= 0 {
            return Err(CoreError::invalid("entity_id", "must be positive"));
        }

        let entity_type = request.entity_type.trim().to_lowercase();
        if !KNOWN_NOTE_ENTITY_TYPES.contains(&entity_type.as_str()) {
            warn!(entity_type = %entity_type, "note attached to an unrecognized entity type");
        }

        let note = Note {
            audit: crate::domain::AuditFields::new(audit.now(), audit.user_id()),
            entity_type,
            entity_id: request.entity_id,
            title: request.title,
            content: request.content,
            priority: request.priority,
            category: request.category,
        };
        self.inner().create(note, audit)
    }

    pub fn delete(&self, id: i64) -> CoreResult<()> {
        self.inner().delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain::NotePriority;
    use chrono::Utc;
    use std::sync::Arc;

    fn audit() -> AuditContext {
        AuditContext::new(1, Arc::new(FixedClock(Utc::now())))
    }

    #[test]
    fn rejects_blank_content() {
        let store = InMemoryStore::default();
        let service = NoteService::new(&store);
        let request = CreateNoteRequest {
            entity_type: "company".to_string(),
            entity_id: 1,
            title: None,
            content: "   ".to_string(),
            priority: NotePriority::Normal,
            category: None,
        };
        assert!(service.create(request, &audit()).is_err());
    }

    #[test]
    fn rejects_non_positive_entity_id() {
        let store = InMemoryStore::default();
        let service = NoteService::new(&store);
        let request = CreateNoteRequest {
            entity_type: "company".to_string(),
            entity_id: 0,
            title: None,
            content: "hello".to_string(),
            priority: NotePriority::Normal,
            category: None,
        };
        assert!(service.create(request, &audit()).is_err());
    }

    #[test]
    fn accepts_unknown_entity_type_with_warning() {
        let store = InMemoryStore::default();
        let service = NoteService::new(&store);
        let request = CreateNoteRequest {
            entity_type: "WIDGET".to_string(),
            entity_id: 7,
            title: None,
            content: "unusual target".to_string(),
            priority: NotePriority::Low,
            category: None,
        };
        let note = service.create(request, &audit()).unwrap();
        assert_eq!(note.entity_type, "widget");
    }

    fn company() -> crate::domain::Company {
        crate::domain::Company {
            audit: crate::domain::AuditFields { id: 42, ..crate::domain::AuditFields::new(Utc::now(), 1) },
            soft_delete: Default::default(),
            name: "Acme SA".to_string(),
            trigram: "AKG".to_string(),
            company_type: crate::catalog::CompanyType::Client,
            country_code: Some("CL".to_string()),
            city_code: None,
            main_address: None,
            phone: None,
            website: None,
            vat_id: None,
        }
    }

    #[test]
    fn typed_attach_and_for_aggregate_avoid_stringly_typed_call_sites() {
        let store = InMemoryStore::default();
        let service = NoteService::new(&store);
        let target = company();

        service.attach(&target, "follow up next week".to_string(), NotePriority::High, &audit()).unwrap();

        let notes = service.for_aggregate(&target);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].entity_type, "company");
        assert_eq!(notes[0].entity_id, 42);
    }
}
