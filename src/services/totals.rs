//! Shared totals arithmetic for line-item bearing documents (§4.4,
//! §8 invariant 5). All monetary arithmetic uses `rust_decimal::Decimal`.

use rust_decimal::Decimal;

use crate::domain::Totals;

/// `subtotal = quantity × unit_price × (1 − discount% / 100)`.
pub fn line_subtotal(quantity: Decimal, unit_price: Decimal, discount_percentage: Option<Decimal>) -> Decimal {
    let discount = discount_percentage.unwrap_or(Decimal::ZERO);
    quantity * unit_price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
}

/// Recompute `tax_amount` and `total` from a freshly-summed `subtotal`.
pub fn recompute(subtotal: Decimal, tax_percentage: Decimal) -> Totals {
    let tax_amount = subtotal * tax_percentage / Decimal::ONE_HUNDRED;
    Totals { subtotal, tax_percentage, tax_amount, total: subtotal + tax_amount }
}
