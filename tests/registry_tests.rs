mod common;

use std::collections::{BTreeMap, HashMap};

use blueprint_assembly::facts::fact_model::{LocatorFlag, LocatorStrategy};
use blueprint_assembly::locator::cascade::{resolve_locator, ResolveCtx};
use blueprint_assembly::locator::resolve_page::resolve_page;
use blueprint_assembly::registry::component_registry::{build_registry, ComponentSource};
use blueprint_assembly::registry::template::SelectorTemplate;
use common::{approx, element, page_fact, with_attr, with_expr_attr, with_text};

fn icon_button_source() -> ComponentSource {
    // IconButton({ label }) rendering <button aria-label={label}>
    ComponentSource {
        file_path: "src/components/IconButton.tsx".to_string(),
        declared_props: vec!["label".to_string()],
        elements: vec![with_expr_attr(element("button"), "aria-label", "label")],
    }
}

// =========================================================================
// Registry building
// =========================================================================

#[test]
fn component_template_is_parameterized_by_props() {
    let registry = build_registry(&[icon_button_source()]);

    assert_eq!(registry.component_count(), 1);
    let templates = registry.lookup("IconButton").expect("IconButton registered");
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].prop_names, vec!["label".to_string()]);
    assert_eq!(
        templates[0].selector_template.render_raw(),
        "page.getByRole('button', { name: '{{label}}' })"
    );
    assert_eq!(templates[0].strategy, LocatorStrategy::Role);
    assert!(templates[0].is_interactive);
}

#[test]
fn non_pascal_case_files_are_not_components() {
    let source = ComponentSource {
        file_path: "src/lib/helpers.ts".to_string(),
        declared_props: vec![],
        elements: vec![with_text(element("button"), "Click")],
    };
    let registry = build_registry(&[source]);
    assert_eq!(registry.component_count(), 0);
}

#[test]
fn route_directory_files_are_call_sites_not_definitions() {
    let source = ComponentSource {
        file_path: "src/pages/Dashboard.tsx".to_string(),
        declared_props: vec![],
        elements: vec![with_text(element("button"), "Refresh")],
    };
    let registry = build_registry(&[source]);
    assert_eq!(registry.component_count(), 0, "pages/ is excluded even when PascalCase");
}

#[test]
fn index_files_take_the_parent_directory_name() {
    let source = ComponentSource {
        file_path: "src/components/SearchBar/index.tsx".to_string(),
        declared_props: vec!["placeholder".to_string()],
        elements: vec![with_expr_attr(element("input"), "placeholder", "placeholder")],
    };
    let registry = build_registry(&[source]);
    assert!(registry.lookup("SearchBar").is_some());
}

#[test]
fn component_without_resolvable_locator_contributes_nothing() {
    let source = ComponentSource {
        file_path: "src/components/Wrapper.tsx".to_string(),
        declared_props: vec!["children".to_string()],
        elements: vec![element("div")],
    };
    let registry = build_registry(&[source]);
    assert_eq!(registry.component_count(), 0, "no locator is not an error");
}

#[test]
fn literal_attribute_values_pass_through_unchanged() {
    let source = ComponentSource {
        file_path: "src/components/SaveButton.tsx".to_string(),
        declared_props: vec!["onClick".to_string()],
        elements: vec![with_attr(element("button"), "data-testid", "save")],
    };
    let registry = build_registry(&[source]);
    let templates = registry.lookup("SaveButton").expect("registered");
    assert_eq!(templates[0].selector_template.render_raw(), "page.getByTestId('save')");
    assert!(templates[0].prop_names.is_empty(), "constant template has no props");
}

// =========================================================================
// Call-site resolution (two-pass mechanism)
// =========================================================================

#[test]
fn literal_prop_call_site_resolves_to_named_role_locator() {
    let registry = build_registry(&[icon_button_source()]);
    let ctx = ResolveCtx {
        html_for: &HashMap::new(),
        registry: Some(&registry),
    };

    let call_site = with_attr(element("IconButton"), "label", "Export");
    let loc = resolve_locator(&call_site, &ctx).expect("call site resolves");

    assert_eq!(loc.selector, "page.getByRole('button', { name: 'Export' })");
    assert_eq!(loc.name, "Export");
    assert!(!loc.flags.contains(&LocatorFlag::DynamicProp));
    assert!(approx(loc.confidence, 0.80));
}

#[test]
fn dynamic_prop_call_site_is_flagged_with_placeholder_token() {
    let registry = build_registry(&[icon_button_source()]);
    let ctx = ResolveCtx {
        html_for: &HashMap::new(),
        registry: Some(&registry),
    };

    let call_site = with_expr_attr(element("IconButton"), "label", "dynamicVar");
    let loc = resolve_locator(&call_site, &ctx).expect("call site still resolves");

    assert_eq!(
        loc.selector,
        "page.getByRole('button', { name: '[label]' })",
        "same role shape with a placeholder token in place of the name"
    );
    assert!(loc.flags.contains(&LocatorFlag::DynamicProp));
    assert!(loc.is_dynamic);
    assert!(approx(loc.confidence, 0.60), "0.80 - 0.20, got {}", loc.confidence);
}

#[test]
fn missing_prop_behaves_like_dynamic_prop() {
    let registry = build_registry(&[icon_button_source()]);
    let ctx = ResolveCtx {
        html_for: &HashMap::new(),
        registry: Some(&registry),
    };

    let call_site = element("IconButton");
    let loc = resolve_locator(&call_site, &ctx).expect("resolves with placeholder");
    assert!(loc.selector.contains("[label]"));
    assert!(loc.flags.contains(&LocatorFlag::DynamicProp));
}

#[test]
fn component_duplicate_of_native_selector_is_discarded() {
    let registry = build_registry(&[icon_button_source()]);

    let mut fact = page_fact(Some("/exports"), "Exports", "src/pages/exports.tsx");
    fact.elements = vec![
        with_attr(element("button"), "aria-label", "Export"),
        with_attr(element("IconButton"), "label", "Export"),
    ];

    let page = resolve_page(&fact, &registry);
    let exports: Vec<_> = page
        .locators
        .iter()
        .filter(|l| l.selector == "page.getByRole('button', { name: 'Export' })")
        .collect();
    assert_eq!(exports.len(), 1, "byte-identical selectors dedupe to the native one");
    assert!(approx(exports[0].confidence, 0.85), "native aria-label confidence kept");
}

// =========================================================================
// Template parsing
// =========================================================================

#[test]
fn template_parse_and_render_round_trip() {
    let raw = "page.getByRole('button', { name: '{{label}}' })";
    let template = SelectorTemplate::parse(raw);
    assert_eq!(template.render_raw(), raw);
    assert_eq!(template.prop_names(), vec!["label".to_string()]);
}

#[test]
fn template_substitution_reports_unresolved_placeholders() {
    let template = SelectorTemplate::parse("page.getByTestId('{{id}}-{{suffix}}')");

    let mut values = BTreeMap::new();
    values.insert("id".to_string(), Some("row".to_string()));
    values.insert("suffix".to_string(), None);

    let (selector, unresolved) = template.substitute(&values);
    assert_eq!(selector, "page.getByTestId('row-[suffix]')");
    assert!(unresolved);
}

#[test]
fn literal_text_resembling_a_prop_name_is_not_substituted() {
    // "label" appears as literal text, not as a {{label}} placeholder
    let template = SelectorTemplate::parse("page.getByText('label {{label}}')");
    let mut values = BTreeMap::new();
    values.insert("label".to_string(), Some("Price".to_string()));

    let (selector, unresolved) = template.substitute(&values);
    assert_eq!(selector, "page.getByText('label Price')");
    assert!(!unresolved);
}
