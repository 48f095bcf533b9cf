use crate::error::CoreError;

/// Validate a website URL: trim, require a case-insensitive `http://` or
/// `https://` prefix. `None`/empty passes through unchanged.
pub fn normalize_url(field: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = value else { return Ok(None) };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Some(trimmed.to_string()))
    } else {
        Err(CoreError::invalid(
            field,
            format!("URL must start with http:// or https://. Got: {raw}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert_eq!(
            normalize_url("website", Some("https://example.com")).unwrap(),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_url("website", Some("HTTP://example.com")).unwrap(),
            Some("HTTP://example.com".to_string())
        );
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(normalize_url("website", Some("example.com")).is_err());
    }

    #[test]
    fn none_and_empty_pass_through() {
        assert_eq!(normalize_url("website", None).unwrap(), None);
        assert_eq!(normalize_url("website", Some("  ")).unwrap(), None);
    }
}
