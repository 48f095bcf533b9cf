//! Document and aggregate lifecycle services (§4.4). Each service wraps
//! one or more [`crate::repository::Repository`] instances with the
//! business rules a plain CRUD layer cannot express: number allocation,
//! totals recalculation, status transitions, and cross-field invariants.

mod address;
mod company_rut;
mod delivery;
mod invoice;
mod note;
mod order;
mod payment_condition;
mod quote;
pub mod totals;

pub use address::AddressService;
pub use company_rut::CompanyRutService;
pub use delivery::{CreateDeliveryRequest, DeliveryService, MarkDeliveredRequest};
pub use invoice::{CreateInvoiceRequest, InvoiceService};
pub use note::{CreateNoteRequest, NoteService};
pub use order::{CreateFromQuoteRequest, OrderService};
pub use payment_condition::PaymentConditionService;
pub use quote::{AddQuoteLineRequest, CreateQuoteRequest, QuoteService};
