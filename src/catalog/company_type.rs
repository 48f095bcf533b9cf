use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A company's commercial relationship to the tenant: client or supplier.
/// Modeled as a closed enum rather than a lookup row — the set is fixed by
/// the domain, not configuration (§3 "Company": "company type must resolve
/// to one of {CLIENT, SUPPLIER}").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Client,
    Supplier,
}

impl CompanyType {
    pub fn code(self) -> &'static str {
        match self {
            CompanyType::Client => "CLIENT",
            CompanyType::Supplier => "SUPPLIER",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "CLIENT" => Ok(CompanyType::Client),
            "SUPPLIER" => Ok(CompanyType::Supplier),
            other => Err(CoreError::invalid(
                "company_type",
                format!("unknown company type: {other}"),
            )),
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
