use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditFields, SoftDelete};
use crate::error::CoreResult;
use crate::store::Entity;

/// Kind of catalog item (§3 "Product").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    Article,
    Nomenclature,
    Service,
}

/// How a [`Product`]'s cost and sale price are derived (§4.3 "BOM engine").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceCalculationMode {
    Manual,
    FromComponents,
    FromCostMargin,
}

/// A catalog item; leaf (ARTICLE/SERVICE) or BOM node (NOMENCLATURE)
/// (§3 "Product").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub audit: AuditFields,
    #[serde(flatten)]
    pub soft_delete: SoftDelete,
    pub product_type: ProductType,
    /// Uppercase, unique, at least 2 characters.
    pub reference: String,
    pub designation_es: String,
    pub designation_en: Option<String>,
    pub designation_fr: Option<String>,
    pub short_designation: Option<String>,
    pub unit_code: Option<String>,
    pub family_type_code: Option<String>,
    pub matter_code: Option<String>,
    pub sales_type_code: Option<String>,
    pub origin_country_code: Option<String>,

    pub purchase_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub sale_price_eur: Option<Decimal>,
    /// Percentage in `[-100, 1000]`.
    pub margin_percentage: Option<Decimal>,

    /// ARTICLE only.
    pub stock_quantity: Option<i64>,
    pub minimum_stock: Option<i64>,
    pub stock_location: Option<String>,

    pub net_weight: Option<Decimal>,
    pub gross_weight: Option<Decimal>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub volume: Option<Decimal>,

    pub price_calculation_mode: PriceCalculationMode,
}

impl Entity for Product {
    fn kind() -> &'static str {
        "product"
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

    fn mark_deleted(&mut self, now: DateTime<Utc>, by: i64) -> CoreResult<()> {
        self.soft_delete = SoftDelete { is_deleted: true, deleted_at: Some(now), deleted_by: Some(by) };
        self.audit.touch(now, by);
        Ok(())
    }
}

/// Edge of the BOM graph (§3 "ProductComponent", §4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductComponent {
    #[serde(flatten)]
    pub audit: AuditFields,
    pub parent_id: i64,
    pub component_id: i64,
    /// Must be strictly positive.
    pub quantity: Decimal,
    pub notes: Option<String>,
}

impl Entity for ProductComponent {
    fn kind() -> &'static str {
        "product_component"
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
