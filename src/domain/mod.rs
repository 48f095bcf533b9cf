//! Data model (§3): the entities persisted by the core, independent of how
//! they are stored or serviced.

mod address;
mod company;
mod contact;
mod document;
mod note;
mod payment_condition;
mod plant;
mod principal;
mod product;
mod sequence;
mod service;

pub use address::Address;
pub use company::{Company, CompanyRut};
pub use contact::Contact;
pub use document::{
    DeliveryOrder, DeliveryStatus, InvoiceExport, InvoiceSii, InvoicePaymentStatus, Order,
    OrderKind, OrderProduct, OrderStatus, Quote, QuoteProduct, QuoteStatus, Totals,
};
pub use note::{Note, NotePriority, KNOWN_NOTE_ENTITY_TYPES};
pub use payment_condition::PaymentCondition;
pub use plant::Plant;
pub use principal::Principal;
pub use product::{PriceCalculationMode, Product, ProductComponent, ProductType};
pub use sequence::Sequence;
pub use service::Service;

use chrono::{DateTime, Utc};

/// Audit/bookkeeping fields common to every persisted entity (§3).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuditFields {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i64,
    pub updated_by: i64,
    pub is_active: bool,
}

impl AuditFields {
    /// Fields for a row not yet assigned an id by the store.
    pub fn new(now: DateTime<Utc>, by: i64) -> Self {
        AuditFields {
            id: 0,
            created_at: now,
            updated_at: now,
            created_by: by,
            updated_by: by,
            is_active: true,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>, by: i64) {
        self.updated_at = now;
        self.updated_by = by;
    }
}

/// Soft-delete bookkeeping, composed into entities that declare the
/// capability (§4.6 `soft_delete`). Entities without this field fall back
/// to the repository's `Unsupported` default.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SoftDelete {
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<i64>,
}
