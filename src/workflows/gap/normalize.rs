/// Canonicalize a domain for comparison and cache keying: lower-case, strip
/// protocol and `www.`, drop trailing slashes. Total and idempotent.
pub fn normalize_domain(raw: &str) -> String {
    let mut value = raw.trim().to_ascii_lowercase();
    for prefix in ["https://", "http://"] {
        if let Some(rest) = value.strip_prefix(prefix) {
            value = rest.to_string();
            break;
        }
    }
    if let Some(rest) = value.strip_prefix("www.") {
        value = rest.to_string();
    }
    value.trim_end_matches('/').to_string()
}

/// Canonicalize a keyword: lower-case, trim, collapse internal whitespace
/// to single spaces.
pub fn normalize_keyword(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
