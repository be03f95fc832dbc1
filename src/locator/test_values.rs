// ============================================================================
// Suggested fill values for form-flow steps and test-data hints
// ============================================================================

/// Derive a sensible fill value from a field's label and input type.
pub fn suggest_value(label: &str, input_type: Option<&str>) -> String {
    let l = label.to_lowercase();

    // Label-based heuristics (checked in order)
    if l.contains("email") {
        return "user@example.com".into();
    }
    if l.contains("password") {
        return "TestPass123!".into();
    }
    if l.contains("phone") || l.contains("tel") {
        return "555-0100".into();
    }
    if l.contains("url") || l.contains("website") {
        return "https://example.com".into();
    }
    if l.contains("zip") || l.contains("postal") {
        return "90210".into();
    }
    if l.contains("username") || l.contains("user") {
        return "testuser".into();
    }
    if l.contains("name") {
        return "Jane Doe".into();
    }
    if l.contains("search") || l.contains("query") {
        return "test query".into();
    }
    if l.contains("date") {
        return "2025-01-15".into();
    }
    if l.contains("number") || l.contains("amount") || l.contains("quantity") {
        return "42".into();
    }

    // Fallback to input type
    if let Some(t) = input_type {
        match t {
            "email" => return "user@example.com".into(),
            "password" => return "TestPass123!".into(),
            "tel" => return "555-0100".into(),
            "url" => return "https://example.com".into(),
            "number" => return "42".into(),
            "date" => return "2025-01-15".into(),
            _ => {}
        }
    }

    "test".into()
}

/// Semantic field kind recorded on a form-flow step.
pub fn field_kind(label: &str, input_type: Option<&str>) -> &'static str {
    if let Some(t) = input_type {
        match t {
            "email" => return "email",
            "password" => return "password",
            "number" => return "number",
            "date" | "datetime-local" | "datetime" => return "date",
            "tel" => return "tel",
            "url" => return "url",
            "checkbox" => return "checkbox",
            "radio" => return "radio",
            _ => {}
        }
    }

    let lower = label.to_lowercase();
    if lower.contains("email") {
        return "email";
    }
    if lower.contains("password") {
        return "password";
    }
    if lower.contains("phone") || lower.contains("tel") {
        return "tel";
    }
    if lower.contains("date") {
        return "date";
    }

    "text"
}
