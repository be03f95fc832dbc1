use crate::facts::normalize::{is_generic_prefix, normalize_path, param_name};

// ============================================================================
// Domain key derivation
// ============================================================================

/// Reserved key for paths with no usable segment (`/`, `/api`).
pub const ROOT_DOMAIN: &str = "root";

/// Coarse grouping key for a path or route: the first segment that is
/// not a generic API/version prefix, normalized to a lowercase,
/// filesystem-safe token.
pub fn domain_key(path: &str) -> String {
    for seg in normalize_path(path).split('/').filter(|s| !s.is_empty()) {
        if is_generic_prefix(seg) {
            continue;
        }
        let token = sanitize_token(&param_name(seg));
        if !token.is_empty() {
            return token;
        }
    }
    ROOT_DOMAIN.to_string()
}

/// Lowercase and replace anything outside `[a-z0-9_-]` with `-`,
/// trimming leading/trailing dashes.
pub fn sanitize_token(raw: &str) -> String {
    let mapped: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_matches('-').to_string()
}
