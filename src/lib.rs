//! # comercia-core
//!
//! Transactional business core for quotes, orders, deliveries and
//! invoices: the document lifecycle, a gap-free concurrent sequence
//! generator, a bill-of-materials roll-up engine, and an audit-context
//! repository layer, with catalog and validator support for Chilean and
//! EU trading partners.
//!
//! All monetary and quantity arithmetic uses [`rust_decimal::Decimal`] —
//! never floating point. Every write carries an explicit
//! [`audit::AuditContext`] rather than relying on ambient session state.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, Utc};
//! use comercia_core::audit::AuditContext;
//! use comercia_core::clock::SystemClock;
//! use comercia_core::config::CoreConfig;
//! use comercia_core::services::{CreateQuoteRequest, QuoteService};
//! use comercia_core::uow::Store;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let store = Store::new();
//! let config = CoreConfig::default();
//! let audit = AuditContext::new(1, Arc::new(SystemClock));
//! let uow = store.begin(audit);
//!
//! let quote = QuoteService::new(uow.store()).create(
//!     CreateQuoteRequest {
//!         company_id: 1,
//!         issuing_staff_id: 1,
//!         currency_code: "CLP".to_string(),
//!         quote_date: Utc::now().date_naive(),
//!         valid_until: None,
//!         tax_percentage: dec!(19),
//!         number: None,
//!         prefix: Some("AKG".to_string()),
//!     },
//!     &uow,
//!     &config,
//! ).unwrap();
//!
//! assert!(quote.number.starts_with("C-AKG-"));
//! uow.commit().unwrap();
//! ```

pub mod audit;
pub mod bom;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod sequence_generator;
pub mod services;
pub mod store;
pub mod uow;
pub mod validators;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use uow::UnitOfWork;
