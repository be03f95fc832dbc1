// ============================================================================
// Tag → ARIA role mapping and role guard sets
// ============================================================================

/// Semantic ARIA role for a native tag, taking the input type into
/// account. Returns None for tags with no useful implicit role.
pub fn role_for(tag: &str, input_type: Option<&str>) -> Option<&'static str> {
    match tag {
        "button" => Some("button"),
        "a" => Some("link"),
        "select" => Some("combobox"),
        "textarea" => Some("textbox"),
        "option" => Some("option"),
        "img" => Some("img"),
        "nav" => Some("navigation"),
        "main" => Some("main"),
        "form" => Some("form"),
        "table" => Some("table"),
        "ul" | "ol" => Some("list"),
        "li" => Some("listitem"),
        "header" => Some("banner"),
        "footer" => Some("contentinfo"),
        "aside" => Some("complementary"),
        "section" => Some("region"),
        "dialog" => Some("dialog"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some("heading"),
        "input" => match input_type.unwrap_or("text") {
            "checkbox" => Some("checkbox"),
            "radio" => Some("radio"),
            "range" => Some("slider"),
            "number" => Some("spinbutton"),
            "search" => Some("searchbox"),
            "submit" | "button" | "reset" | "image" => Some("button"),
            "hidden" => None,
            _ => Some("textbox"),
        },
        _ => None,
    }
}

/// Structural roles that are ambiguous without a qualifying name:
/// an unqualified match would select page chrome, not one element.
const NAMELESS_UNSAFE_ROLES: &[&str] = &[
    "main",
    "navigation",
    "banner",
    "contentinfo",
    "complementary",
    "region",
    "list",
    "listitem",
    "table",
    "form",
    "toolbar",
    "menu",
    "menubar",
    "tablist",
];

/// Form-control roles that are ambiguous without a qualifying name on
/// any multi-field form.
const FORM_CONTROL_ROLES: &[&str] = &[
    "textbox",
    "searchbox",
    "combobox",
    "listbox",
    "checkbox",
    "radio",
    "spinbutton",
    "slider",
    "switch",
];

pub fn is_nameless_unsafe(role: &str) -> bool {
    NAMELESS_UNSAFE_ROLES.contains(&role)
}

pub fn is_form_control(role: &str) -> bool {
    FORM_CONTROL_ROLES.contains(&role)
}

/// Text-entry controls eligible for label-based locators. The caller
/// excludes password inputs separately.
pub fn is_text_entry(tag: &str, input_type: Option<&str>) -> bool {
    match tag {
        "textarea" | "select" => true,
        "input" => matches!(
            input_type.unwrap_or("text"),
            "text" | "email" | "search" | "number" | "tel" | "url" | "date" | "time"
                | "month" | "week" | "password"
        ),
        _ => false,
    }
}

/// Roles representing elements a test would interact with (click, fill,
/// toggle) rather than just observe.
pub fn is_interactive_role(role: &str) -> bool {
    matches!(
        role,
        "button"
            | "link"
            | "textbox"
            | "searchbox"
            | "combobox"
            | "listbox"
            | "checkbox"
            | "radio"
            | "spinbutton"
            | "slider"
            | "switch"
            | "tab"
            | "menuitem"
            | "option"
    )
}

/// Element kind recorded on the locator: the semantic role when one
/// exists, the raw tag otherwise.
pub fn element_kind(tag: &str, input_type: Option<&str>) -> String {
    role_for(tag, input_type)
        .map(str::to_string)
        .unwrap_or_else(|| tag.to_string())
}
