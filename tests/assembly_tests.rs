mod common;

use std::collections::BTreeSet;

use blueprint_assembly::assembly::merge::{assemble, consolidate_pages, merge_endpoints};
use blueprint_assembly::assembly::scoring::{endpoint_confidence, page_confidence};
use blueprint_assembly::facts::fact_model::{
    BodyField, EndpointFlag, HttpMethod, RequestBody,
};
use blueprint_assembly::locator::resolve_page::resolve_page;
use blueprint_assembly::registry::component_registry::ComponentRegistry;
use common::{approx, element, endpoint, page_fact, with_attr, with_text};

fn body_field(name: &str) -> BodyField {
    BodyField {
        name: name.to_string(),
        field_type: "string".to_string(),
        required: true,
        example: Some("value".to_string()),
    }
}

// =========================================================================
// Endpoint merge
// =========================================================================

#[test]
fn duplicate_endpoints_merge_on_method_and_normalized_path() {
    let mut a = endpoint(HttpMethod::Get, "/api/users/");
    a.confidence = 0.7;
    let mut b = endpoint(HttpMethod::Get, "/api//users");
    b.confidence = 0.9;
    b.auth_required = true;
    b.auth_type = Some("bearer_jwt".to_string());
    b.roles.insert("admin".to_string());
    b.flags.insert(EndpointFlag::DynamicPath);

    let merged = merge_endpoints(vec![a, b]);
    assert_eq!(merged.len(), 1, "trailing and repeated separators collapse");

    let ep = &merged[0];
    assert!(approx(ep.confidence, 0.9), "max confidence wins");
    assert!(ep.auth_required, "authRequired is OR'd");
    assert_eq!(ep.auth_type.as_deref(), Some("bearer_jwt"));
    assert!(ep.roles.contains("admin"), "roles are unioned");
    assert!(ep.flags.contains(&EndpointFlag::DynamicPath), "flags are unioned");
}

#[test]
fn different_methods_do_not_merge() {
    let merged = merge_endpoints(vec![
        endpoint(HttpMethod::Get, "/api/users"),
        endpoint(HttpMethod::Post, "/api/users"),
    ]);
    assert_eq!(merged.len(), 2);
}

#[test]
fn first_non_null_body_wins_in_sorted_order() {
    let mut late = endpoint(HttpMethod::Post, "/api/users");
    late.source_file = "src/b.ts".to_string();
    late.request_body = RequestBody::Inferred {
        fields: vec![body_field("email")],
    };

    let mut early = endpoint(HttpMethod::Post, "/api/users");
    early.source_file = "src/a.ts".to_string();
    early.request_body = RequestBody::Validated {
        schema_ref: "createUserSchema".to_string(),
        fields: vec![body_field("email"), body_field("name")],
    };

    // Arrival order must not matter: the sort key decides
    let merged_one = merge_endpoints(vec![late.clone(), early.clone()]);
    let merged_two = merge_endpoints(vec![early, late]);

    for merged in [&merged_one, &merged_two] {
        assert_eq!(merged.len(), 1);
        assert!(
            matches!(&merged[0].request_body, RequestBody::Validated { schema_ref, .. }
                if schema_ref == "createUserSchema"),
            "body from the first source file in sort order is kept"
        );
    }
}

#[test]
fn merged_blueprint_has_unique_endpoint_keys() {
    let raw = vec![
        endpoint(HttpMethod::Get, "/api/users"),
        endpoint(HttpMethod::Get, "/api/users/"),
        endpoint(HttpMethod::Post, "/api/users"),
        endpoint(HttpMethod::Get, "/api/orders"),
        endpoint(HttpMethod::Get, "/api//orders"),
    ];
    let blueprint = assemble(raw, vec![], None);

    let mut keys = BTreeSet::new();
    for ep in &blueprint.endpoints {
        assert!(
            keys.insert((ep.method, ep.path.trim_end_matches('/').replace("//", "/"))),
            "duplicate key after merge: {} {}",
            ep.method.as_str(),
            ep.path
        );
    }
}

// =========================================================================
// Endpoint confidence recompute
// =========================================================================

#[test]
fn body_source_penalties_are_exhaustive() {
    let mut ep = endpoint(HttpMethod::Post, "/api/things");
    ep.request_body = RequestBody::None;
    assert!(approx(endpoint_confidence(&ep), 0.75), "no body on POST");

    ep.request_body = RequestBody::Inferred {
        fields: vec![body_field("x")],
    };
    assert!(approx(endpoint_confidence(&ep), 0.85), "inferred body");

    ep.request_body = RequestBody::Typed {
        type_name: "CreateThing".to_string(),
        fields: vec![body_field("x")],
    };
    assert!(approx(endpoint_confidence(&ep), 0.90), "typed but unvalidated");

    ep.request_body = RequestBody::Validated {
        schema_ref: "thingSchema".to_string(),
        fields: vec![body_field("x")],
    };
    assert!(approx(endpoint_confidence(&ep), 1.0), "validated body");
}

#[test]
fn read_methods_are_exempt_from_body_penalty() {
    let ep = endpoint(HttpMethod::Get, "/api/things");
    assert!(approx(endpoint_confidence(&ep), 1.0), "GET without body is the expected shape");

    let ep = endpoint(HttpMethod::Delete, "/api/things/:id");
    assert!(approx(endpoint_confidence(&ep), 1.0));
}

#[test]
fn flag_penalties_stack() {
    let mut ep = endpoint(HttpMethod::Get, "/api/things");
    ep.flags.insert(EndpointFlag::UnresolvedPathPrefix);
    ep.flags.insert(EndpointFlag::DynamicPath);
    ep.flags.insert(EndpointFlag::ConditionalRoute);
    assert!(
        approx(endpoint_confidence(&ep), 0.55),
        "1.0 - 0.20 - 0.15 - 0.10, got {}",
        endpoint_confidence(&ep)
    );
}

#[test]
fn unclassified_auth_mechanism_costs_ten_points() {
    let mut ep = endpoint(HttpMethod::Get, "/api/secret");
    ep.auth_required = true;
    assert!(approx(endpoint_confidence(&ep), 0.90));

    ep.auth_type = Some("bearer_jwt".to_string());
    assert!(approx(endpoint_confidence(&ep), 1.0), "classified auth has no penalty");
}

#[test]
fn confidence_never_leaves_unit_interval() {
    let mut ep = endpoint(HttpMethod::Post, "/api/things");
    ep.flags.insert(EndpointFlag::UnresolvedPathPrefix);
    ep.flags.insert(EndpointFlag::DynamicPath);
    ep.flags.insert(EndpointFlag::ConditionalRoute);
    ep.auth_required = true;
    ep.request_body = RequestBody::None;

    let score = endpoint_confidence(&ep);
    assert!((0.0..=1.0).contains(&score), "clamped, got {}", score);
}

// =========================================================================
// Page confidence recompute
// =========================================================================

#[test]
fn page_penalties_for_dynamic_routes_and_missing_locators() {
    let registry = ComponentRegistry::new();

    let mut fact = page_fact(Some("/users/:id"), "User detail", "src/pages/user.tsx");
    fact.elements = vec![with_text(element("h1"), "User")];
    let page = resolve_page(&fact, &registry);
    assert!(approx(page_confidence(&page), 0.95), "dynamic route costs 0.05");

    let bare = page_fact(Some("/about"), "About", "src/pages/about.tsx");
    let page = resolve_page(&bare, &registry);
    assert!(approx(page_confidence(&page), 0.80), "zero locators cost 0.20");
}

// =========================================================================
// SPA consolidation
// =========================================================================

#[test]
fn router_page_absorbs_component_page_locators() {
    let registry = ComponentRegistry::new();

    // Router declaration: route known, no locators
    let router_fact = page_fact(Some("/dashboard"), "Dashboard", "src/router.tsx");

    // Component extraction: route derived from filename, has locators
    let mut component_fact = page_fact(None, "DashboardPage", "src/components/DashboardPage.tsx");
    component_fact.elements = vec![
        with_text(element("h1"), "Dashboard"),
        with_attr(element("button"), "data-testid", "refresh"),
    ];

    let pages = vec![
        resolve_page(&router_fact, &registry),
        resolve_page(&component_fact, &registry),
    ];
    let consolidated = consolidate_pages(pages);

    assert_eq!(consolidated.len(), 1, "donor page is not present in final output");
    let page = &consolidated[0];
    assert_eq!(page.route, "/dashboard", "router route wins");
    assert_eq!(page.locators.len(), 2, "component locators are folded in");
}

#[test]
fn unmatched_widget_routes_are_dropped_as_phantoms() {
    let registry = ComponentRegistry::new();

    let mut widget_fact = page_fact(None, "OrderWidget", "src/components/OrderWidget.tsx");
    widget_fact.elements = vec![with_text(element("h2"), "Orders")];

    let real_fact = page_fact(Some("/orders"), "Orders", "src/router.tsx");

    let pages = vec![
        resolve_page(&widget_fact, &registry),
        resolve_page(&real_fact, &registry),
    ];
    let consolidated = consolidate_pages(pages);

    assert_eq!(consolidated.len(), 1);
    assert_eq!(consolidated[0].route, "/orders", "\"/OrderWidget\" is not a URL");
}

#[test]
fn title_match_grafts_onto_first_route_sharing_final_segment() {
    // Known ambiguity, preserved deliberately: a shared final segment
    // means the donor folds into whichever route sorts first.
    let registry = ComponentRegistry::new();

    let a = page_fact(Some("/admin/settings"), "Admin settings", "src/router.tsx");
    let b = page_fact(Some("/user/settings"), "User settings", "src/router.tsx");
    let mut donor = page_fact(None, "SettingsPage", "src/components/SettingsPage.tsx");
    donor.elements = vec![with_text(element("h1"), "Settings")];

    let pages = vec![
        resolve_page(&a, &registry),
        resolve_page(&b, &registry),
        resolve_page(&donor, &registry),
    ];
    let consolidated = consolidate_pages(pages);

    assert_eq!(consolidated.len(), 2);
    let admin = consolidated.iter().find(|p| p.route == "/admin/settings").unwrap();
    let user = consolidated.iter().find(|p| p.route == "/user/settings").unwrap();
    assert_eq!(admin.locators.len(), 1, "donor grafts onto the first match in route order");
    assert_eq!(user.locators.len(), 0);
}

#[test]
fn same_route_pages_union_locators() {
    let registry = ComponentRegistry::new();

    let mut a = page_fact(Some("/login"), "Login", "src/pages/login.tsx");
    a.elements = vec![with_attr(element("button"), "data-testid", "submit")];
    let mut b = page_fact(Some("/login"), "Login", "src/pages/login-extra.tsx");
    b.elements = vec![
        with_attr(element("button"), "data-testid", "submit"),
        with_attr(element("input"), "placeholder", "Email"),
    ];

    let consolidated = consolidate_pages(vec![
        resolve_page(&a, &registry),
        resolve_page(&b, &registry),
    ]);

    assert_eq!(consolidated.len(), 1);
    let selectors: Vec<&str> = consolidated[0]
        .locators
        .iter()
        .map(|l| l.selector.as_str())
        .collect();
    assert_eq!(selectors.len(), 2, "union, never replace, never duplicate");

    let unique: BTreeSet<&str> = selectors.iter().copied().collect();
    assert_eq!(unique.len(), selectors.len(), "selectors stay unique per page");
}
