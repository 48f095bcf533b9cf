use crate::error::CoreError;

/// Validate a Chilean RUT (Rol Único Tributario) and normalize it to
/// `NNNNNNNN-D` form. Strips dots, spaces and the hyphen before checking,
/// then recomputes the mod-11 check digit over the reversed body with the
/// cyclic factor sequence `[2,3,4,5,6,7]`. `None`/empty passes through
/// unchanged.
pub fn normalize_rut(field: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = value else { return Ok(None) };
    if raw.is_empty() {
        return Ok(None);
    }

    let rut: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'K' || *c == 'k')
        .collect();

    if rut.len() < 2 {
        return Err(CoreError::invalid(field, format!("RUT too short: {raw}")));
    }

    let (body, check_digit) = rut.split_at(rut.len() - 1);
    let check_digit = check_digit.to_uppercase();

    if !body.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::invalid(field, format!("invalid RUT body: {raw}")));
    }

    let expected = expected_check_digit(body);
    if check_digit != expected {
        return Err(CoreError::invalid(
            field,
            format!("invalid RUT check digit: {raw} (expected {expected}, got {check_digit})"),
        ));
    }

    Ok(Some(format!("{body}-{check_digit}")))
}

fn expected_check_digit(body: &str) -> String {
    const FACTORS: [u32; 6] = [2, 3, 4, 5, 6, 7];

    let sum: u32 = body
        .chars()
        .rev()
        .enumerate()
        .map(|(i, c)| c.to_digit(10).unwrap() * FACTORS[i % 6])
        .sum();

    match 11 - (sum % 11) {
        11 => "0".to_string(),
        10 => "K".to_string(),
        n => n.to_string(),
    }
}

/// Render an already-validated RUT (`NNNNNNNN-D`) with thousand-separator
/// dots: `12.345.678-9`. Does not re-validate.
pub fn format_rut(value: &str) -> Option<String> {
    let (body, check) = value.split_once('-')?;

    let mut grouped = String::new();
    for (i, c) in body.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    Some(format!("{grouped}-{check}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_dots_and_validates() {
        assert_eq!(
            normalize_rut("rut", Some("12.345.678-5")).unwrap(),
            Some("12345678-5".to_string())
        );
    }

    #[test]
    fn rejects_wrong_check_digit() {
        assert!(normalize_rut("rut", Some("12345678-0")).is_err());
    }

    #[test]
    fn accepts_repunit() {
        assert_eq!(
            normalize_rut("rut", Some("11111111-1")).unwrap(),
            Some("11111111-1".to_string())
        );
    }

    #[test]
    fn check_digit_k_uppercased() {
        // body "6": sum = 6*2 = 12, 12 % 11 = 1, 11 - 1 = 10 -> 'K'.
        assert_eq!(
            normalize_rut("rut", Some("6-k")).unwrap(),
            Some("6-K".to_string())
        );
    }

    #[test]
    fn round_trip_format_then_validate() {
        let normalized = normalize_rut("rut", Some("12345678-5")).unwrap().unwrap();
        let formatted = format_rut(&normalized).unwrap();
        assert_eq!(formatted, "12.345.678-5");
        let reparsed = normalize_rut("rut", Some(&formatted)).unwrap();
        assert_eq!(reparsed, Some(normalized));
    }

    #[test]
    fn none_and_empty_pass_through() {
        assert_eq!(normalize_rut("rut", None).unwrap(), None);
        assert_eq!(normalize_rut("rut", Some("")).unwrap(), None);
    }

    #[test]
    fn too_short_fails() {
        assert!(normalize_rut("rut", Some("5")).is_err());
    }
}
