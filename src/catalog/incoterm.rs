//! Incoterms 2020 reference table, used as a classification on orders and
//! export invoices (GLOSSARY "Incoterm").

/// Check whether `code` is a known Incoterms 2020 rule.
pub fn is_known_incoterm(code: &str) -> bool {
    lookup_incoterm(code).is_some()
}

/// Look up an Incoterms 2020 rule's display name by its three-letter code.
pub fn lookup_incoterm(code: &str) -> Option<&'static str> {
    INCOTERMS
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|i| INCOTERMS[i].1)
}

static INCOTERMS: &[(&str, &str)] = &[
    ("CFR", "Cost and Freight"),
    ("CIF", "Cost, Insurance and Freight"),
    ("CIP", "Carriage and Insurance Paid To"),
    ("CPT", "Carriage Paid To"),
    ("DAP", "Delivered At Place"),
    ("DDP", "Delivered Duty Paid"),
    ("DPU", "Delivered at Place Unloaded"),
    ("EXW", "Ex Works"),
    ("FAS", "Free Alongside Ship"),
    ("FCA", "Free Carrier"),
    ("FOB", "Free On Board"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_incoterms() {
        assert_eq!(lookup_incoterm("EXW"), Some("Ex Works"));
        assert!(is_known_incoterm("DDP"));
    }

    #[test]
    fn unknown_incoterm() {
        assert_eq!(lookup_incoterm("XXX"), None);
    }

    #[test]
    fn list_is_sorted() {
        for window in INCOTERMS.windows(2) {
            assert!(window[0].0 < window[1].0, "incoterms not sorted: {} >= {}", window[0].0, window[1].0);
        }
    }
}
