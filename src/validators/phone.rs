use crate::error::CoreError;

/// Validate an E.164-ish phone number: strip common separators, require
/// 8-15 digits with an optional leading `+`. Returns the *original*
/// (unstripped) form on success so display formatting like `"+56 9 1234 5678"`
/// survives. `None`/empty passes through unchanged.
pub fn normalize_phone(field: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = value else { return Ok(None) };
    if raw.is_empty() {
        return Ok(None);
    }

    let clean: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    let digits = clean.strip_prefix('+').unwrap_or(&clean);
    let valid = (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());

    if valid {
        Ok(Some(raw.to_string()))
    } else {
        Err(CoreError::invalid(
            field,
            format!("phone must be 8-15 digits, optionally starting with +. Got: {raw}"),
        ))
    }
}
