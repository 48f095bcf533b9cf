use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::store::Entity;

/// §4.4.1 Quote lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub fn code(self) -> &'static str {
        match self {
            QuoteStatus::Draft => "DRAFT",
            QuoteStatus::Sent => "SENT",
            QuoteStatus::Accepted => "ACCEPTED",
            QuoteStatus::Rejected => "REJECTED",
            QuoteStatus::Expired => "EXPIRED",
        }
    }
}

/// §4.4.2 Order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn code(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Sales vs. purchase orders (§4.4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Sales,
    Purchase,
}

/// §4.4.3 DeliveryOrder lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn code(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::InTransit => "IN_TRANSIT",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Shared payment status across both invoice siblings (§4.4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoicePaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// Commercial document totals shared by every line-item bearing document
/// (§4.4, §8 invariant 5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_percentage: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn zero(tax_percentage: Decimal) -> Self {
        Totals {
            subtotal: Decimal::ZERO,
            tax_percentage,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// §3 "Quote".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub number: String,
    pub company_id: i64,
    pub issuing_staff_id: i64,
    pub currency_code: String,
    pub status: QuoteStatus,
    pub quote_date: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    #[serde(flatten)]
    pub totals: Totals,
}

impl Entity for Quote {
    fn kind() -> &'static str {
        "quote"
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

/// §3 "QuoteProduct" — a quote line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteProduct {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub quote_id: i64,
    pub product_id: i64,
    pub sequence: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percentage: Option<Decimal>,
    pub subtotal: Decimal,
}

impl Entity for QuoteProduct {
    fn kind() -> &'static str {
        "quote_product"
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

/// §3 "Order". May reference an originating [`Quote`] (`quote_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub number: String,
    pub company_id: i64,
    pub issuing_staff_id: i64,
    pub currency_code: String,
    pub status: OrderStatus,
    pub kind: OrderKind,
    pub is_export: bool,
    pub quote_id: Option<i64>,
    pub order_date: NaiveDate,
    pub promised_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub totals: Totals,
}

impl Order {
    /// `promised_date` in the past and not yet completed (§4.4.2).
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.completed_date.is_none() && self.promised_date.is_some_and(|d| d < today)
    }
}

impl Entity for Order {
    fn kind() -> &'static str {
        "order"
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

/// §3 "OrderProduct" — an order line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub order_id: i64,
    pub product_id: i64,
    pub sequence: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percentage: Option<Decimal>,
    pub subtotal: Decimal,
}

impl Entity for OrderProduct {
    fn kind() -> &'static str {
        "order_product"
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

/// §3 "DeliveryOrder".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOrder {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub number: String,
    pub order_id: i64,
    pub status: DeliveryStatus,
    pub delivery_date: NaiveDate,
    pub actual_delivery_date: Option<NaiveDate>,
    pub signature_name: Option<String>,
    pub signature_id: Option<String>,
    pub signature_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl DeliveryOrder {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }

    /// `delivery_date` in the past and not delivered yet, or delivered
    /// later than promised (§4.4.3).
    pub fn is_late(&self, today: NaiveDate) -> bool {
        match self.actual_delivery_date {
            Some(actual) => actual > self.delivery_date,
            None => !self.is_delivered() && self.delivery_date < today,
        }
    }

    pub fn days_late(&self, today: NaiveDate) -> i64 {
        match self.actual_delivery_date {
            Some(actual) => (actual - self.delivery_date).num_days().max(0),
            None if !self.is_delivered() => (today - self.delivery_date).num_days().max(0),
            None => 0,
        }
    }
}

impl Entity for DeliveryOrder {
    fn kind() -> &'static str {
        "delivery_order"
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

/// §3/§4.4.4 domestic SII invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSii {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub invoice_number: String,
    pub company_id: i64,
    pub order_id: Option<i64>,
    pub currency_code: String,
    pub invoice_date: NaiveDate,
    pub payment_status: InvoicePaymentStatus,
    #[serde(flatten)]
    pub totals: Totals,
}

impl Entity for InvoiceSii {
    fn kind() -> &'static str {
        "invoice_sii"
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

/// §3/§4.4.4 export invoice — sibling of [`InvoiceSii`], adds a
/// destination country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceExport {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub invoice_number: String,
    pub company_id: i64,
    pub order_id: Option<i64>,
    pub currency_code: String,
    pub invoice_date: NaiveDate,
    pub payment_status: InvoicePaymentStatus,
    pub destination_country_code: String,
    #[serde(flatten)]
    pub totals: Totals,
}

impl Entity for InvoiceExport {
    fn kind() -> &'static str {
        "invoice_export"
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

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(status: DeliveryStatus, delivery_date: NaiveDate, actual: Option<NaiveDate>) -> DeliveryOrder {
        DeliveryOrder {
            audit: AuditFields::new(Utc::now(), 1),
            number: "GD-2025-0001".to_string(),
            order_id: 1,
            status,
            delivery_date,
            actual_delivery_date: actual,
            signature_name: None,
            signature_id: None,
            signature_datetime: None,
            notes: None,
        }
    }

    #[test]
    fn late_when_past_due_and_not_delivered() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let d = delivery(DeliveryStatus::InTransit, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), None);
        assert!(d.is_late(today));
        assert_eq!(d.days_late(today), 31);
    }

    #[test]
    fn late_when_delivered_after_promised_date() {
        let promised = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let actual = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        let d = delivery(DeliveryStatus::Delivered, promised, Some(actual));
        assert!(d.is_late(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert_eq!(d.days_late(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()), 3);
    }

    #[test]
    fn not_late_when_delivered_on_time() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let d = delivery(DeliveryStatus::Delivered, date, Some(date));
        assert!(!d.is_late(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
    }

    #[test]
    fn order_overdue_predicate() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut order = Order {
            audit: AuditFields::new(Utc::now(), 1),
            number: "O-2025-0001".to_string(),
            company_id: 1,
            issuing_staff_id: 1,
            currency_code: "CLP".to_string(),
            status: OrderStatus::InProgress,
            kind: OrderKind::Sales,
            is_export: false,
            quote_id: None,
            order_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            promised_date: Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            completed_date: None,
            totals: Totals::zero(Decimal::ZERO),
        };
        assert!(order.is_overdue(today));
        order.completed_date = Some(today);
        assert!(!order.is_overdue(today));
    }
}
