use std::collections::{BTreeMap, HashMap};

use crate::facts::fact_model::{Locator, LocatorFlag, LocatorStrategy};
use crate::locator::element_model::{AttrValue, ParentContext, UiElement};
use crate::locator::roles::{
    element_kind, is_form_control, is_interactive_role, is_nameless_unsafe, is_text_entry,
    role_for,
};
use crate::locator::widgets;
use crate::registry::component_registry::ComponentRegistry;

// ============================================================================
// Locator resolution cascade
// ============================================================================
//
// For native HTML tags, a strict fallthrough cascade: each step either
// returns a locator or declines, never retrying a prior step. For
// PascalCase tags, the well-known widget table is consulted first and
// the Component Registry second.

/// Conventional test-id attribute names, checked in order.
pub const TESTID_ATTRS: &[&str] = &["data-testid", "data-test-id", "data-test", "data-cy", "data-qa"];

const CONDITIONAL_PENALTY: f32 = 0.10;
const DYNAMIC_LIST_PENALTY: f32 = 0.15;
const DYNAMIC_TESTID_PENALTY: f32 = 0.25;
const DYNAMIC_PROP_PENALTY: f32 = 0.20;

/// Shared context for resolving the elements of one page file.
pub struct ResolveCtx<'a> {
    /// id → label text, from the file's `<label htmlFor=..>` pre-pass.
    pub html_for: &'a HashMap<String, String>,

    /// Component Registry for custom-widget second-pass resolution.
    pub registry: Option<&'a ComponentRegistry>,
}

/// Escape a value for embedding inside a single-quoted selector string.
pub fn esc(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn esc_double(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn regex_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if ".+*?^$()[]{}|\\/".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Leading literal fragment of a computed attribute expression, used
/// for prefix-match selectors (`` `row-${id}` `` → `row-`).
fn literal_prefix(expr: &str) -> String {
    let expr = expr.trim();
    let mut chars = expr.chars();
    let quote = match chars.next() {
        Some(c @ ('`' | '\'' | '"')) => c,
        _ => return String::new(),
    };
    let mut prefix = String::new();
    for c in chars {
        if c == quote || c == '$' || c == '{' {
            break;
        }
        prefix.push(c);
    }
    prefix
}

pub(crate) fn new_locator(
    name: &str,
    selector: String,
    strategy: LocatorStrategy,
    kind: &str,
    is_interactive: bool,
    confidence: f32,
) -> Locator {
    Locator {
        id: String::new(),
        name: name.to_string(),
        selector,
        strategy,
        element_kind: kind.to_string(),
        is_interactive,
        is_conditional: false,
        is_dynamic: false,
        confidence,
        flags: Default::default(),
    }
}

// ============================================================================
// Public entry points
// ============================================================================

/// Resolve one element to its single best locator, or nothing.
pub fn resolve_locator(el: &UiElement, ctx: &ResolveCtx) -> Option<Locator> {
    resolve_all(el, ctx).into_iter().next()
}

/// Resolve one element to all of its candidate locators. Native tags
/// and table widgets yield at most one; a registry component yields one
/// per registered template.
pub fn resolve_all(el: &UiElement, ctx: &ResolveCtx) -> Vec<Locator> {
    let mut found: Vec<Locator> = if el.is_native() {
        resolve_native(el, ctx.html_for).into_iter().collect()
    } else {
        match widgets::resolve_widget(el) {
            Some(loc) => vec![loc],
            None => ctx
                .registry
                .map(|r| resolve_component(el, r))
                .unwrap_or_default(),
        }
    };

    for loc in &mut found {
        apply_parent_context(loc, &el.parent);
    }
    found
}

fn apply_parent_context(loc: &mut Locator, parent: &ParentContext) {
    if parent.conditional {
        loc.is_conditional = true;
        loc.flags.insert(LocatorFlag::ConditionalElement);
        loc.confidence -= CONDITIONAL_PENALTY;
    }
    if parent.in_map_callback {
        loc.is_dynamic = true;
        loc.flags.insert(LocatorFlag::DynamicList);
        loc.confidence -= DYNAMIC_LIST_PENALTY;
    }
    loc.confidence = loc.confidence.clamp(0.0, 1.0);
}

// ============================================================================
// Native-tag cascade
// ============================================================================

pub fn resolve_native(el: &UiElement, html_for: &HashMap<String, String>) -> Option<Locator> {
    let input_type = el.input_type();
    let kind = element_kind(&el.tag, input_type);
    let interactive = role_for(&el.tag, input_type)
        .map(is_interactive_role)
        .unwrap_or(false);

    // 1. Explicit test-id attribute
    for attr_name in TESTID_ATTRS {
        if let Some(value) = el.attr(attr_name) {
            return Some(match value {
                AttrValue::Literal(v) => new_locator(
                    v,
                    format!("page.getByTestId('{}')", esc(v)),
                    LocatorStrategy::TestId,
                    &kind,
                    interactive,
                    0.95,
                ),
                AttrValue::Expression(expr) => {
                    let prefix = literal_prefix(expr);
                    let selector = if prefix.is_empty() {
                        format!("page.locator('[{}]')", attr_name)
                    } else {
                        format!("page.locator('[{}^=\"{}\"]')", attr_name, esc_double(&prefix))
                    };
                    let name = if prefix.is_empty() { el.tag.as_str() } else { prefix.as_str() };
                    let mut loc = new_locator(
                        name,
                        selector,
                        LocatorStrategy::TestId,
                        &kind,
                        interactive,
                        0.95 - DYNAMIC_TESTID_PENALTY,
                    );
                    loc.is_dynamic = true;
                    loc.flags.insert(LocatorFlag::DynamicTestid);
                    loc
                }
            });
        }
    }

    // 2. aria-label with a literal value
    if let Some(label) = el.literal_attr("aria-label") {
        let selector = match role_for(&el.tag, input_type) {
            Some(role) => format!("page.getByRole('{}', {{ name: '{}' }})", role, esc(label)),
            None => format!("page.getByLabel('{}')", esc(label)),
        };
        let strategy = if role_for(&el.tag, input_type).is_some() {
            LocatorStrategy::Role
        } else {
            LocatorStrategy::Label
        };
        return Some(new_locator(label, selector, strategy, &kind, interactive, 0.85));
    }

    // 3. Label text inherited from a wrapping <label>, for text-entry
    //    controls other than password
    if let Some(label) = el.parent.label_text.as_deref() {
        if is_text_entry(&el.tag, input_type) && input_type != Some("password") {
            return Some(new_locator(
                label,
                format!("page.getByLabel('{}')", esc(label)),
                LocatorStrategy::Label,
                &kind,
                interactive,
                0.90,
            ));
        }
    }

    // 4. htmlFor-linked label
    if let Some(id) = el.literal_attr("id") {
        if let Some(label) = html_for.get(id) {
            if input_type != Some("password") {
                return Some(new_locator(
                    label,
                    format!("page.getByLabel('{}')", esc(label)),
                    LocatorStrategy::Label,
                    &kind,
                    interactive,
                    0.92,
                ));
            }
        }
    }

    // 5. Password inputs always use the type attribute, never a label
    if el.tag == "input" && input_type == Some("password") {
        return Some(new_locator(
            "Password",
            "page.locator('input[type=\"password\"]')".to_string(),
            LocatorStrategy::Css,
            &kind,
            true,
            0.75,
        ));
    }

    // 6. Semantic role, qualified by literal text when available
    if let Some(role) = role_for(&el.tag, input_type) {
        if el.tag == "img" {
            if let Some(alt) = el.literal_attr("alt") {
                return Some(new_locator(
                    alt,
                    format!("page.getByAltText('{}')", esc(alt)),
                    LocatorStrategy::AltText,
                    "img",
                    false,
                    0.75,
                ));
            }
        }

        // Submit/button inputs carry their label in the value attribute
        let text = el
            .literal_text()
            .or_else(|| match input_type {
                Some("submit") | Some("button") => el.literal_attr("value"),
                _ => None,
            });

        match text {
            Some(t) => {
                let selector = if role == "heading" && t.ends_with('(') {
                    // Suspected dynamic counter suffix ("Items (")
                    format!("page.getByRole('heading', {{ name: /^{}/ }})", regex_escape(t))
                } else {
                    format!("page.getByRole('{}', {{ name: '{}' }})", role, esc(t))
                };
                return Some(new_locator(t, selector, LocatorStrategy::Role, &kind, interactive, 0.75));
            }
            None => {
                // Unqualified structural and form-control roles are
                // ambiguous at runtime; decline and fall through.
                if !is_nameless_unsafe(role) && !is_form_control(role) {
                    return Some(new_locator(
                        role,
                        format!("page.getByRole('{}')", role),
                        LocatorStrategy::Role,
                        &kind,
                        interactive,
                        0.75,
                    ));
                }
            }
        }
    }

    // 7. Placeholder
    if let Some(placeholder) = el.literal_attr("placeholder") {
        return Some(new_locator(
            placeholder,
            format!("page.getByPlaceholder('{}')", esc(placeholder)),
            LocatorStrategy::Placeholder,
            &kind,
            interactive,
            0.70,
        ));
    }

    // 8. name attribute, form controls only
    if matches!(el.tag.as_str(), "input" | "select" | "textarea") {
        if let Some(name) = el.literal_attr("name") {
            return Some(new_locator(
                name,
                format!("page.locator('{}[name=\"{}\"]')", el.tag, esc_double(name)),
                LocatorStrategy::Css,
                &kind,
                interactive,
                0.65,
            ));
        }
    }

    // 9. id selector
    if let Some(id) = el.literal_attr("id") {
        let mut loc = new_locator(
            id,
            format!("page.locator('#{}')", id),
            LocatorStrategy::Css,
            &kind,
            interactive,
            0.50,
        );
        loc.flags.insert(LocatorFlag::Brittle);
        return Some(loc);
    }

    // 10. First class name
    if let Some(class) = el.literal_attr("className").or_else(|| el.literal_attr("class")) {
        if let Some(first) = class.split_whitespace().next() {
            let mut loc = new_locator(
                first,
                format!("page.locator('.{}')", first),
                LocatorStrategy::Css,
                &kind,
                interactive,
                0.50,
            );
            loc.flags.insert(LocatorFlag::Brittle);
            return Some(loc);
        }
    }

    None
}

// ============================================================================
// Component Registry second pass
// ============================================================================

/// Resolve a custom-widget call site against the registry: one locator
/// per registered template, substituting literal prop values and
/// flagging placeholders left by non-literal or missing props.
pub fn resolve_component(el: &UiElement, registry: &ComponentRegistry) -> Vec<Locator> {
    let Some(templates) = registry.lookup(&el.tag) else {
        return Vec::new();
    };

    templates
        .iter()
        .map(|tpl| {
            let mut values: BTreeMap<String, Option<String>> = BTreeMap::new();
            let mut first_literal: Option<String> = None;
            for prop in &tpl.prop_names {
                let value = match el.attr(prop) {
                    Some(AttrValue::Literal(s)) => Some(esc(s)),
                    _ => None,
                };
                if first_literal.is_none() {
                    if let Some(v) = &value {
                        first_literal = Some(v.clone());
                    }
                }
                values.insert(prop.clone(), value);
            }

            let (selector, unresolved) = tpl.selector_template.substitute(&values);
            let name = first_literal.unwrap_or_else(|| el.tag.clone());

            let mut loc = new_locator(
                &name,
                selector,
                tpl.strategy,
                &tpl.element_kind,
                tpl.is_interactive,
                0.80,
            );
            if unresolved {
                loc.is_dynamic = true;
                loc.flags.insert(LocatorFlag::DynamicProp);
                loc.confidence -= DYNAMIC_PROP_PENALTY;
            }
            loc
        })
        .collect()
}
