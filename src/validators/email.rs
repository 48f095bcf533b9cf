use crate::error::CoreError;

/// Validate and normalize an email address: trim, lowercase, then check
/// against a simplified RFC 5322 shape (`local@domain.tld`). `None`/empty
/// passes through unchanged — most contact fields are optional.
pub fn normalize_email(field: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = value else { return Ok(None) };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let value = raw.trim().to_lowercase();

    let Some(at) = value.find('@') else {
        return Err(CoreError::invalid(field, format!("invalid email format: {raw}")));
    };
    let (local, domain) = (&value[..at], &value[at + 1..]);

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));

    let Some(last_dot) = domain.rfind('.') else {
        return Err(CoreError::invalid(field, format!("invalid email format: {raw}")));
    };
    let (domain_head, tld) = (&domain[..last_dot], &domain[last_dot + 1..]);

    let domain_head_ok = !domain_head.is_empty()
        && domain_head
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    if local_ok && domain_head_ok && tld_ok {
        Ok(Some(value))
    } else {
        Err(CoreError::invalid(field, format!("invalid email format: {raw}")))
    }
}
