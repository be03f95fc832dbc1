use crate::facts::fact_model::ParamSpec;

// ============================================================================
// Path and route normalization
// ============================================================================

/// Normalize a path for identity comparison: collapse repeated
/// separators and strip trailing separators. `/` itself stays `/`.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(seg);
    }
    out
}

/// Whether a path segment is a dynamic parameter in any of the route
/// syntaxes the extractors emit (`:id`, `[id]`, `{id}`, `${id}`, `*`).
pub fn is_dynamic_segment(seg: &str) -> bool {
    seg.starts_with(':')
        || (seg.starts_with('[') && seg.ends_with(']'))
        || (seg.starts_with('{') && seg.ends_with('}'))
        || seg.contains("${")
        || seg == "*"
}

/// Extract the bare parameter name from a dynamic segment.
pub fn param_name(seg: &str) -> String {
    seg.trim_start_matches(':')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim_start_matches("...")
        .to_string()
}

/// Derive route parameters from a route's dynamic segments.
pub fn route_params(route: &str) -> Vec<ParamSpec> {
    route
        .split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| is_dynamic_segment(s))
        .map(|s| ParamSpec {
            name: param_name(s),
            example: None,
        })
        .collect()
}

/// Rewrite every dynamic segment to `*` so paths written in different
/// route syntaxes compare equal (`/users/:id` vs `/users/${userId}`).
pub fn wildcard_path(path: &str) -> String {
    let normalized = normalize_path(path);
    let mut out = String::with_capacity(normalized.len());
    out.push('/');
    for seg in normalized.split('/').filter(|s| !s.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        if is_dynamic_segment(seg) {
            out.push('*');
        } else {
            out.push_str(seg);
        }
    }
    out
}

/// Whether two paths describe the same endpoint, exactly or after
/// wildcard-normalizing dynamic segments on both sides.
pub fn paths_match(a: &str, b: &str) -> bool {
    if normalize_path(a) == normalize_path(b) {
        return true;
    }
    wildcard_path(a) == wildcard_path(b)
}

/// Generic API/version prefixes carry no domain information and are
/// skipped when deriving domain keys and convention-match segments.
pub fn is_generic_prefix(seg: &str) -> bool {
    if seg.eq_ignore_ascii_case("api") || seg.eq_ignore_ascii_case("rest") {
        return true;
    }
    let mut chars = seg.chars();
    matches!(chars.next(), Some('v') | Some('V'))
        && seg.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}

/// First path segment that is neither a generic prefix nor a dynamic
/// parameter, lowercased. Used for convention-based endpoint linking.
pub fn first_meaningful_segment(path: &str) -> Option<String> {
    normalize_path(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .find(|s| !is_generic_prefix(s) && !is_dynamic_segment(s))
        .map(|s| s.to_lowercase())
}

/// Strip origin and query string from a literal call URL, keeping only
/// the path part used for endpoint matching.
pub fn call_url_path(url: &str) -> String {
    let without_origin = if let Some(rest) = url.strip_prefix("http://") {
        rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
    } else if let Some(rest) = url.strip_prefix("https://") {
        rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
    } else {
        url
    };
    let without_query = without_origin
        .split_once('?')
        .map(|(p, _)| p)
        .unwrap_or(without_origin);
    normalize_path(without_query)
}
