use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::locator::cascade::resolve_native;
use crate::locator::element_model::{Attr, AttrValue, UiElement};
use crate::locator::resolve_page::build_html_for_map;
use crate::registry::template::{ComponentTemplate, SelectorTemplate};

// ============================================================================
// Component Registry
// ============================================================================
//
// Pre-pass over non-route component sources: each custom widget that
// renders a concrete HTML-native locator contributes one parameterized
// template per renderable locator. Call sites are resolved against
// these templates in the locator engine's second pass.

/// A parsed component definition file: its declared props and the UI
/// elements it renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSource {
    pub file_path: String,

    #[serde(default)]
    pub declared_props: Vec<String>,

    #[serde(default)]
    pub elements: Vec<UiElement>,
}

/// Custom-widget name → locator templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentRegistry {
    templates: BTreeMap<String, Vec<ComponentTemplate>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: ComponentTemplate) {
        self.templates
            .entry(template.component_name.clone())
            .or_default()
            .push(template);
    }

    pub fn lookup(&self, component_name: &str) -> Option<&[ComponentTemplate]> {
        self.templates.get(component_name).map(|v| v.as_slice())
    }

    pub fn component_count(&self) -> usize {
        self.templates.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.values().map(|v| v.len()).sum()
    }
}

/// Build the registry from component definition files.
///
/// Files under a routes/pages directory are excluded even when
/// PascalCase: those are call sites, not definitions. A component with
/// no resolvable HTML-native locator contributes nothing.
pub fn build_registry(sources: &[ComponentSource]) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();

    for src in sources {
        let Some(name) = component_name(&src.file_path) else {
            continue;
        };
        if in_route_dir(&src.file_path) {
            continue;
        }

        let html_for = build_html_for_map(&src.elements);
        let mut seen: BTreeSet<String> = BTreeSet::new();

        for el in &src.elements {
            // Native elements only: component resolution is skipped in
            // this pre-pass to avoid recursion.
            if !el.is_native() {
                continue;
            }
            let materialized = materialize_props(el, &src.declared_props);
            if let Some(loc) = resolve_native(&materialized, &html_for) {
                if !seen.insert(loc.selector.clone()) {
                    continue;
                }
                let template = SelectorTemplate::parse(&loc.selector);
                registry.insert(ComponentTemplate {
                    component_name: name.clone(),
                    prop_names: template.prop_names(),
                    selector_template: template,
                    strategy: loc.strategy,
                    element_kind: loc.element_kind,
                    is_interactive: loc.is_interactive,
                });
            }
        }
    }

    registry
}

/// Rewrite prop-referencing expression values as `{{prop}}` literals so
/// the native cascade embeds placeholders; literal values pass through.
fn materialize_props(el: &UiElement, declared_props: &[String]) -> UiElement {
    let as_placeholder = |value: &AttrValue| -> AttrValue {
        match value {
            AttrValue::Expression(expr) if declared_props.iter().any(|p| p == expr.trim()) => {
                AttrValue::Literal(format!("{{{{{}}}}}", expr.trim()))
            }
            other => other.clone(),
        }
    };

    UiElement {
        tag: el.tag.clone(),
        attrs: el
            .attrs
            .iter()
            .map(|a| Attr {
                name: a.name.clone(),
                value: as_placeholder(&a.value),
            })
            .collect(),
        text: el.text.as_ref().map(|t| as_placeholder(t)),
        parent: el.parent.clone(),
    }
}

/// Component name from the file path: the PascalCase file stem, or the
/// parent directory name for index files. Non-PascalCase names are not
/// component definitions.
fn component_name(file_path: &str) -> Option<String> {
    let file_name = file_path.rsplit('/').next()?;
    let stem = file_name.split('.').next()?;

    let candidate = if stem == "index" {
        file_path.rsplit('/').nth(1)?
    } else {
        stem
    };

    is_pascal_case(candidate).then(|| candidate.to_string())
}

fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_uppercase()
        && name.chars().all(|c| c.is_ascii_alphanumeric())
        && name.chars().any(|c| c.is_ascii_lowercase())
}

fn in_route_dir(file_path: &str) -> bool {
    file_path
        .split('/')
        .any(|seg| matches!(seg, "routes" | "pages" | "views" | "app"))
}
