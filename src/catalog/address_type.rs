use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Classification of a Company address (§3 "Address").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    Delivery,
    Billing,
    Headquarters,
    Branch,
}

impl AddressType {
    pub fn code(self) -> &'static str {
        match self {
            AddressType::Delivery => "DELIVERY",
            AddressType::Billing => "BILLING",
            AddressType::Headquarters => "HEADQUARTERS",
            AddressType::Branch => "BRANCH",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "DELIVERY" => Ok(AddressType::Delivery),
            "BILLING" => Ok(AddressType::Billing),
            "HEADQUARTERS" => Ok(AddressType::Headquarters),
            "BRANCH" => Ok(AddressType::Branch),
            other => Err(CoreError::invalid(
                "address_type",
                format!("unknown address type: {other}"),
            )),
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_code() {
        for at in [
            AddressType::Delivery,
            AddressType::Billing,
            AddressType::Headquarters,
            AddressType::Branch,
        ] {
            assert_eq!(AddressType::from_code(at.code()).unwrap(), at);
        }
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(AddressType::from_code("WAREHOUSE").is_err());
    }
}
