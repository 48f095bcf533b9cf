//! Read-mostly reference tables (§2 "Lookup catalog").
//!
//! These are thin, sorted static lookups in the style of the reference
//! core's `countries`/`currencies` modules — no database round-trip, no
//! mutation. The core never relies on caching them; a host embedding this
//! crate is free to cache lookups at its own edge.

mod address_type;
mod company_type;
mod country;
mod currency;
mod family_type;
mod incoterm;
mod matter;
mod sales_type;
mod unit;

pub use address_type::AddressType;
pub use company_type::CompanyType;
pub use country::{is_known_country_code, lookup_country};
pub use currency::{is_known_currency_code, lookup_currency};
pub use family_type::is_known_family_type;
pub use incoterm::{is_known_incoterm, lookup_incoterm};
pub use matter::is_known_matter;
pub use sales_type::is_known_sales_type;
pub use unit::{is_known_unit_code, lookup_unit};
