use std::collections::{BTreeMap, BTreeSet};

use crate::assembly::blueprint_model::Blueprint;
use crate::assembly::linking::link_endpoints_to_pages;
use crate::assembly::scoring::{score_endpoint, score_page};
use crate::facts::fact_model::{AuthFact, Endpoint, HttpMethod, Page};
use crate::facts::ids::{endpoint_id, form_flow_id, locator_id};
use crate::facts::normalize::{is_dynamic_segment, normalize_path};

// ============================================================================
// Blueprint assembly
// ============================================================================

/// Merge, score, and cross-link raw endpoint and page facts into the
/// final blueprint. Inputs are consumed; every stage returns a new
/// collection.
pub fn assemble(endpoints: Vec<Endpoint>, pages: Vec<Page>, auth: Option<AuthFact>) -> Blueprint {
    let endpoints: Vec<Endpoint> = merge_endpoints(endpoints)
        .into_iter()
        .map(score_endpoint)
        .collect();

    let pages: Vec<Page> = consolidate_pages(pages)
        .into_iter()
        .map(score_page)
        .collect();

    let pages = link_endpoints_to_pages(&endpoints, pages);

    Blueprint {
        endpoints,
        pages,
        auth,
    }
}

// ============================================================================
// Endpoint merge
// ============================================================================

/// Deduplicate endpoints on `(method, normalized path)`. Facts are
/// sorted on a documented key first so "first non-null" preferences do
/// not depend on producer arrival order.
pub fn merge_endpoints(raw: Vec<Endpoint>) -> Vec<Endpoint> {
    let mut keyed: Vec<(String, Endpoint)> = raw
        .into_iter()
        .map(|ep| (normalize_path(&ep.path), ep))
        .collect();
    keyed.sort_by(|(na, a), (nb, b)| {
        (na.as_str(), a.method, a.source_file.as_str(), a.source_line).cmp(&(
            nb.as_str(),
            b.method,
            b.source_file.as_str(),
            b.source_line,
        ))
    });

    let mut merged: BTreeMap<(String, HttpMethod), Endpoint> = BTreeMap::new();
    for (normalized, mut ep) in keyed {
        let key = (normalized.clone(), ep.method);
        match merged.get_mut(&key) {
            None => {
                ep.id = endpoint_id(ep.method, &normalized);
                merged.insert(key, ep);
            }
            Some(acc) => merge_endpoint_into(acc, ep),
        }
    }

    merged.into_values().collect()
}

fn merge_endpoint_into(acc: &mut Endpoint, other: Endpoint) {
    acc.confidence = acc.confidence.max(other.confidence);
    acc.auth_required |= other.auth_required;
    if acc.auth_type.is_none() {
        acc.auth_type = other.auth_type;
    }
    acc.roles.extend(other.roles);
    acc.flags.extend(other.flags);
    if acc.request_body.is_none() && !other.request_body.is_none() {
        acc.request_body = other.request_body;
    }
    if acc.response_schema.is_none() {
        acc.response_schema = other.response_schema;
    }
    if acc.path_params.is_empty() {
        acc.path_params = other.path_params;
    }
    if acc.query_params.is_empty() {
        acc.query_params = other.query_params;
    }
}

// ============================================================================
// Page consolidation
// ============================================================================

/// Merge pages sharing a route, then fold component-derived locator
/// pages into their router-declared counterparts and drop phantom
/// widget routes.
pub fn consolidate_pages(raw: Vec<Page>) -> Vec<Page> {
    // Same-route merge first (union, never replace).
    let mut keyed: Vec<Page> = raw;
    keyed.sort_by(|a, b| {
        (a.normalized_route.as_str(), a.file_path.as_str())
            .cmp(&(b.normalized_route.as_str(), b.file_path.as_str()))
    });

    let mut by_route: BTreeMap<String, Page> = BTreeMap::new();
    for page in keyed {
        match by_route.get_mut(&page.normalized_route) {
            None => {
                by_route.insert(page.normalized_route.clone(), page);
            }
            Some(acc) => merge_page_into(acc, page),
        }
    }

    // SPA consolidation: router pages without locators absorb matching
    // component pages' locators (and form flows when absent).
    let (component_like, mut routed): (Vec<Page>, Vec<Page>) = by_route
        .into_values()
        .partition(|p| is_widget_route(&p.route));

    let mut consumed: BTreeSet<String> = BTreeSet::new();
    for router_page in routed.iter_mut() {
        if !router_page.locators.is_empty() {
            continue;
        }
        let Some(segment) = last_non_param_segment(&router_page.route) else {
            continue;
        };
        let key = segment.to_lowercase();

        for donor in &component_like {
            if consumed.contains(&donor.id) || donor.locators.is_empty() {
                continue;
            }
            if strip_page_suffix(&donor.title) == key {
                fold_component_page(router_page, donor.clone());
                consumed.insert(donor.id.clone());
                break;
            }
        }
    }

    // Unconsumed widget-looking routes are phantom pages, not URLs.
    routed
}

fn merge_page_into(acc: &mut Page, other: Page) {
    acc.auth_required |= other.auth_required;
    acc.roles.extend(other.roles);
    acc.confidence = acc.confidence.max(other.confidence);
    if acc.title.is_empty() {
        acc.title = other.title;
    }

    let mut seen: BTreeSet<String> = acc.locators.iter().map(|l| l.selector.clone()).collect();
    for mut loc in other.locators {
        if seen.insert(loc.selector.clone()) {
            loc.id = locator_id(&acc.route, &loc.selector);
            acc.locators.push(loc);
        }
    }

    for mut flow in other.form_flows {
        if !acc.form_flows.iter().any(|f| f.name == flow.name) {
            flow.id = form_flow_id(&acc.route, &flow.name);
            acc.form_flows.push(flow);
        }
    }

    for link in other.navigation_links {
        if !acc.navigation_links.contains(&link) {
            acc.navigation_links.push(link);
        }
    }
    for call in other.api_calls {
        if !acc.api_calls.contains(&call) {
            acc.api_calls.push(call);
        }
    }
}

fn fold_component_page(router_page: &mut Page, donor: Page) {
    let mut seen: BTreeSet<String> = router_page
        .locators
        .iter()
        .map(|l| l.selector.clone())
        .collect();
    for mut loc in donor.locators {
        if seen.insert(loc.selector.clone()) {
            loc.id = locator_id(&router_page.route, &loc.selector);
            router_page.locators.push(loc);
        }
    }

    if router_page.form_flows.is_empty() {
        let route = router_page.route.clone();
        router_page.form_flows = donor
            .form_flows
            .into_iter()
            .map(|mut flow| {
                flow.id = form_flow_id(&route, &flow.name);
                flow
            })
            .collect();
    }

    for call in donor.api_calls {
        if !router_page.api_calls.contains(&call) {
            router_page.api_calls.push(call);
        }
    }
}

/// A derived route that names a widget rather than a URL: its last
/// segment starts with an uppercase letter followed by a lowercase one.
fn is_widget_route(route: &str) -> bool {
    let Some(last) = route.split('/').filter(|s| !s.is_empty()).next_back() else {
        return false;
    };
    let mut chars = last.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(first), Some(second)) if first.is_ascii_uppercase() && second.is_ascii_lowercase()
    )
}

fn last_non_param_segment(route: &str) -> Option<&str> {
    route
        .split('/')
        .filter(|s| !s.is_empty() && !is_dynamic_segment(s))
        .next_back()
}

/// Case-folded component title with a trailing "Page" suffix removed,
/// the key used to match a component page to its router route.
fn strip_page_suffix(title: &str) -> String {
    let lower = title.to_lowercase();
    lower
        .strip_suffix("page")
        .filter(|s| !s.is_empty())
        .unwrap_or(&lower)
        .to_string()
}
