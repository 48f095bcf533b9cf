//! Country reference table.
//!
//! Covers Chile, its principal South American trading partners, and the
//! EU member states relevant to the export/VAT side of the core (§3
//! "Company", §4.1 country-of-origin on `Product`). Sorted by code for
//! binary search, in the reference core's `countries` style.

/// Check whether `code` is a known ISO 3166-1 alpha-2 country code in
/// this table.
pub fn is_known_country_code(code: &str) -> bool {
    lookup_country(code).is_some()
}

/// Look up a country's display name by its ISO 3166-1 alpha-2 code.
pub fn lookup_country(code: &str) -> Option<&'static str> {
    COUNTRIES
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|i| COUNTRIES[i].1)
}

static COUNTRIES: &[(&str, &str)] = &[
    ("AR", "Argentina"),
    ("AT", "Austria"),
    ("BE", "Belgium"),
    ("BG", "Bulgaria"),
    ("BO", "Bolivia"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("CL", "Chile"),
    ("CN", "China"),
    ("CO", "Colombia"),
    ("CY", "Cyprus"),
    ("CZ", "Czechia"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("EC", "Ecuador"),
    ("EE", "Estonia"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("GR", "Greece"),
    ("HR", "Croatia"),
    ("HU", "Hungary"),
    ("IE", "Ireland"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("MT", "Malta"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("PE", "Peru"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("PY", "Paraguay"),
    ("RO", "Romania"),
    ("SE", "Sweden"),
    ("SI", "Slovenia"),
    ("SK", "Slovakia"),
    ("US", "United States"),
    ("UY", "Uruguay"),
    ("VE", "Venezuela"),
];
