//! Document number formatting (§4.5 "Sequence generator").
//!
//! The locking mechanics that make issuance gap-free under concurrent
//! writers live in [`crate::store::SequenceLockStore`]; this module is
//! the pure, side-effect-free half of the contract — turning a reserved
//! counter value into the wire format named in §6.

/// Format a reserved sequence value as `{family_code}-{prefix?}-{year}-{NNNN}`,
/// zero-padding `value` to at least `padding` digits. When `prefix` is
/// `None` or empty, its segment and separator are omitted.
pub fn format_number(family_code: &str, prefix: Option<&str>, year: i32, value: u64, padding: usize) -> String {
    let number = format!("{value:0padding$}");
    match prefix {
        Some(p) if !p.is_empty() => format!("{family_code}-{p}-{year}-{number}"),
        _ => format!("{family_code}-{year}-{number}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_prefix() {
        assert_eq!(format_number("C", Some("AKG"), 2025, 1, 4), "C-AKG-2025-0001");
        assert_eq!(format_number("C", Some("AKG"), 2025, 2, 4), "C-AKG-2025-0002");
    }

    #[test]
    fn omits_prefix_segment_when_absent() {
        assert_eq!(format_number("GD", None, 2025, 7, 4), "GD-2025-0007");
        assert_eq!(format_number("GD", Some(""), 2025, 7, 4), "GD-2025-0007");
    }

    #[test]
    fn pads_beyond_four_digits_when_value_is_larger() {
        assert_eq!(format_number("O", None, 2025, 12345, 4), "O-2025-12345");
    }
}
