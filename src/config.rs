//! Core configuration.
//!
//! Configuration is data, not global state — a `CoreConfig` is built once
//! by the host and passed into the services/sequence generator that need
//! it, the same way the reference core parameterizes `InvoiceNumberSequence`
//! padding instead of hardcoding it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Document family → short code used when formatting sequence numbers
/// (e.g. `"quote" -> "C"`, `"order" -> "O"`).
pub type FamilyCodeTable = HashMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Minimum zero-padding width for the numeric part of a document number.
    pub sequence_padding: usize,
    /// Default currency code used when a document omits one.
    pub default_currency: String,
    /// Family → short-code mapping for the sequence generator (§4.5).
    pub family_codes: FamilyCodeTable,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let mut family_codes = HashMap::new();
        family_codes.insert("quote".to_string(), "C".to_string());
        family_codes.insert("order".to_string(), "O".to_string());
        family_codes.insert("delivery".to_string(), "GD".to_string());
        family_codes.insert("invoice_sii".to_string(), "F".to_string());
        family_codes.insert("invoice_export".to_string(), "FE".to_string());

        Self {
            sequence_padding: 4,
            default_currency: "CLP".to_string(),
            family_codes,
        }
    }
}

impl CoreConfig {
    /// Short code for a document family, falling back to the family name
    /// uppercased if it isn't in the table (keeps `generate` total).
    pub fn family_code(&self, family: &str) -> String {
        self.family_codes
            .get(family)
            .cloned()
            .unwrap_or_else(|| family.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_family_codes() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.family_code("quote"), "C");
        assert_eq!(cfg.family_code("order"), "O");
        assert_eq!(cfg.family_code("invoice_sii"), "F");
        assert_eq!(cfg.family_code("invoice_export"), "FE");
        assert_eq!(cfg.family_code("delivery"), "GD");
    }

    #[test]
    fn unknown_family_falls_back_to_uppercase() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.family_code("widget"), "WIDGET");
    }
}
