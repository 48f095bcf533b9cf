use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditFields;
use crate::error::{CoreError, CoreResult};
use crate::store::Entity;

/// A payment term template (§3 "PaymentCondition", §4.4.5). Its three
/// percentages must sum to exactly 100; `validate_percentages` is the
/// gate called before persisting any change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCondition {
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Unique, uppercase.
    pub code: String,
    pub name: String,
    pub days_to_pay: i64,
    pub advance_percentage: Decimal,
    pub on_delivery_percentage: Decimal,
    pub after_delivery_percentage: Decimal,
    pub days_after_delivery: i64,
}

impl PaymentCondition {
    pub fn validate_percentages(&self) -> CoreResult<()> {
        let sum = self.advance_percentage + self.on_delivery_percentage + self.after_delivery_percentage;
        if sum != Decimal::ONE_HUNDRED {
            return Err(CoreError::conflict(format!(
                "payment condition percentages must sum to 100, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Entity for PaymentCondition {
    fn kind() -> &'static str {
        "payment_condition"
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
