//! Pure, total validation functions over strings and decimals (§4.1).
//!
//! No I/O, no logging. Each function either normalizes its input or fails
//! with `CoreError::InvalidInput` carrying a field name and message. Written
//! as direct char/byte scans rather than a regex engine, matching the
//! reference core's own format validators (`vat::format`).

mod decimal;
mod email;
mod phone;
mod rut;
mod url;

pub use decimal::{non_negative_decimal, non_negative_integer};
pub use email::normalize_email;
pub use phone::normalize_phone;
pub use rut::{format_rut, normalize_rut};
pub use url::normalize_url;
