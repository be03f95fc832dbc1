use std::collections::{BTreeSet, HashMap};

use crate::facts::fact_model::{
    FormFact, FormFlow, FormStep, Locator, Page, PageFact, StepAction,
};
use crate::facts::ids::{form_flow_id, locator_id, page_id};
use crate::facts::normalize::{normalize_path, route_params};
use crate::locator::cascade::{resolve_all, resolve_native, ResolveCtx};
use crate::locator::element_model::UiElement;
use crate::locator::test_values::{field_kind, suggest_value};
use crate::registry::component_registry::ComponentRegistry;

// ============================================================================
// Page resolution
// ============================================================================
//
// Turns a raw PageFact into a Page: htmlFor pre-pass, native elements
// first, then custom widgets (table + registry second pass), then form
// flows. Selector uniqueness within the page is enforced here; a
// component-resolved locator whose selector text duplicates a native
// one is discarded.

/// Pre-pass over a file's elements: `<label htmlFor=id>text</label>`
/// pairs, keyed by the target id.
pub fn build_html_for_map(elements: &[UiElement]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for el in elements {
        if el.tag != "label" {
            continue;
        }
        let target = el
            .literal_attr("htmlFor")
            .or_else(|| el.literal_attr("for"));
        if let (Some(id), Some(text)) = (target, el.literal_text()) {
            map.insert(id.to_string(), text.to_string());
        }
    }
    map
}

/// Resolve one raw page fact into a blueprint page.
pub fn resolve_page(fact: &PageFact, registry: &ComponentRegistry) -> Page {
    let route = fact
        .route
        .clone()
        .unwrap_or_else(|| derive_route(&fact.file_path));
    let normalized_route = normalize_path(&route);
    let params = route_params(&normalized_route);

    let html_for = build_html_for_map(&fact.elements);
    let ctx = ResolveCtx {
        html_for: &html_for,
        registry: Some(registry),
    };

    let mut locators: Vec<Locator> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    // Native elements first, so component-resolved duplicates of a
    // native selector are the ones discarded.
    for el in fact.elements.iter().filter(|el| el.is_native()) {
        for loc in resolve_all(el, &ctx) {
            push_unique(&mut locators, &mut seen, loc, &route);
        }
    }
    for el in fact.elements.iter().filter(|el| !el.is_native()) {
        for loc in resolve_all(el, &ctx) {
            push_unique(&mut locators, &mut seen, loc, &route);
        }
    }

    let form_flows = fact
        .forms
        .iter()
        .map(|form| resolve_form(form, &route, &html_for, &mut locators, &mut seen))
        .collect();

    Page {
        id: page_id(&normalized_route),
        route,
        normalized_route,
        title: fact.title.clone(),
        file_path: fact.file_path.clone(),
        auth_required: fact.auth_required,
        roles: fact.roles.clone(),
        is_dynamic: !params.is_empty(),
        route_params: params,
        locators,
        form_flows,
        navigation_links: fact.navigation_links.clone(),
        api_calls: fact.api_calls.clone(),
        linked_endpoint_ids: BTreeSet::new(),
        confidence: fact.confidence,
    }
}

fn push_unique(
    locators: &mut Vec<Locator>,
    seen: &mut BTreeSet<String>,
    mut loc: Locator,
    route: &str,
) -> bool {
    if !seen.insert(loc.selector.clone()) {
        return false;
    }
    loc.id = locator_id(route, &loc.selector);
    locators.push(loc);
    true
}

/// Build a form flow: one fill/check/select step per field, then a
/// click on the submit control. Field locators join the page's locator
/// set through the same uniqueness gate.
fn resolve_form(
    form: &FormFact,
    route: &str,
    html_for: &HashMap<String, String>,
    locators: &mut Vec<Locator>,
    seen: &mut BTreeSet<String>,
) -> FormFlow {
    let mut steps = Vec::new();
    let mut order = 1u32;

    for field in &form.fields {
        let Some(loc) = resolve_native(field, html_for) else {
            continue;
        };
        let input_type = field.input_type();
        let action = match (field.tag.as_str(), input_type) {
            (_, Some("checkbox")) | (_, Some("radio")) => StepAction::Check,
            ("select", _) => StepAction::Select,
            _ => StepAction::Fill,
        };
        let test_value = match action {
            StepAction::Check => None,
            _ => Some(suggest_value(&loc.name, input_type)),
        };

        steps.push(FormStep {
            order,
            action,
            selector: loc.selector.clone(),
            test_value,
            field_kind: field_kind(&loc.name, input_type).to_string(),
        });
        order += 1;

        push_unique(locators, seen, loc, route);
    }

    if let Some(submit) = &form.submit {
        if let Some(loc) = resolve_native(submit, html_for) {
            steps.push(FormStep {
                order,
                action: StepAction::Click,
                selector: loc.selector.clone(),
                test_value: None,
                field_kind: "submit".to_string(),
            });
            push_unique(locators, seen, loc, route);
        }
    }

    FormFlow {
        id: form_flow_id(route, &form.name),
        name: form.name.clone(),
        test_id: form.test_id.clone(),
        steps,
        submit_target: form.submit_target.clone(),
        linked_endpoint_id: None,
        success_redirect_hint: form.success_redirect_hint.clone(),
    }
}

/// Route for a component page with no router declaration: derived from
/// the file stem. Widget-looking results are dropped later by SPA
/// consolidation unless a router page absorbs them.
fn derive_route(file_path: &str) -> String {
    let stem = file_path
        .rsplit('/')
        .next()
        .and_then(|f| f.split('.').next())
        .unwrap_or("unknown");
    format!("/{}", stem)
}
