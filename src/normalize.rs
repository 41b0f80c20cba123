//! URL Normalization
//!
//! Canonical host+path form used for all comparisons. Best-effort: never
//! fails, malformed input degrades to the lowercased trimmed string.

/// Scheme assumed for scheme-less input.
pub const DEFAULT_SCHEME: &str = "http";

/// Normalize with the default scheme.
pub fn normalize_url(raw: &str) -> String {
    normalize_with_scheme(raw, DEFAULT_SCHEME)
}

/// Lowercase and trim, prepend `scheme://` when missing, then keep only
/// authority + path. Query, fragment and trailing slashes are dropped.
pub fn normalize_with_scheme(raw: &str, scheme: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let with_scheme = if lowered.contains("://") {
        lowered.clone()
    } else {
        format!("{scheme}://{lowered}")
    };

    let rest = match with_scheme.split_once("://") {
        Some((_, rest)) => rest,
        None => return lowered,
    };

    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    rest.trim_end_matches('/').to_string()
}
