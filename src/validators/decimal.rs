use rust_decimal::Decimal;

use crate::error::CoreError;

/// Validate that a decimal is non-negative. `None` passes through.
pub fn non_negative_decimal(field: &str, value: Option<Decimal>) -> Result<Option<Decimal>, CoreError> {
    match value {
        Some(v) if v < Decimal::ZERO => {
            Err(CoreError::invalid(field, format!("{field} cannot be negative. Got: {v}")))
        }
        other => Ok(other),
    }
}

/// Validate that an integer is non-negative. `None` passes through.
pub fn non_negative_integer(field: &str, value: Option<i64>) -> Result<Option<i64>, CoreError> {
    match value {
        Some(v) if v < 0 => {
            Err(CoreError::invalid(field, format!("{field} cannot be negative. Got: {v}")))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_negative_decimal() {
        assert!(non_negative_decimal("price", Some(dec!(-10))).is_err());
    }

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(
            non_negative_decimal("price", Some(dec!(0))).unwrap(),
            Some(dec!(0))
        );
        assert_eq!(
            non_negative_decimal("price", Some(dec!(100.50))).unwrap(),
            Some(dec!(100.50))
        );
    }

    #[test]
    fn none_passes_through() {
        assert_eq!(non_negative_decimal("price", None).unwrap(), None);
        assert_eq!(non_negative_integer("qty", None).unwrap(), None);
    }

    #[test]
    fn rejects_negative_integer() {
        assert!(non_negative_integer("qty", Some(-1)).is_err());
        assert_eq!(non_negative_integer("qty", Some(0)).unwrap(), Some(0));
    }
}
