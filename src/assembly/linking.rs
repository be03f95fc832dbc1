use crate::facts::fact_model::{Endpoint, HttpMethod, Page};
use crate::facts::normalize::{call_url_path, first_meaningful_segment, paths_match};

// ============================================================================
// Endpoint–page linking
// ============================================================================
//
// A page links to every endpoint matched by any of three signals:
// literal HTTP-call URLs in the page's source, a first-meaningful-
// segment convention match, and form submission targets. The result is
// the union of all three.

pub fn link_endpoints_to_pages(endpoints: &[Endpoint], pages: Vec<Page>) -> Vec<Page> {
    pages
        .into_iter()
        .map(|page| link_page(endpoints, page))
        .collect()
}

fn link_page(endpoints: &[Endpoint], mut page: Page) -> Page {
    // (a) literal call URLs, exact or wildcard-normalized
    for call in &page.api_calls {
        let call_path = call_url_path(call);
        for ep in endpoints {
            if paths_match(&call_path, &ep.path) {
                page.linked_endpoint_ids.insert(ep.id.clone());
            }
        }
    }

    // (b) convention: shared first meaningful segment
    if let Some(segment) = first_meaningful_segment(&page.route) {
        for ep in endpoints {
            if first_meaningful_segment(&ep.path).as_deref() == Some(segment.as_str()) {
                page.linked_endpoint_ids.insert(ep.id.clone());
            }
        }
    }

    // (c) form submission targets
    let flows = std::mem::take(&mut page.form_flows);
    page.form_flows = flows
        .into_iter()
        .map(|mut flow| {
            if let Some(target) = flow.submit_target.as_deref() {
                let target_path = call_url_path(target);
                let hit = endpoints
                    .iter()
                    .find(|ep| ep.method == HttpMethod::Post && paths_match(&target_path, &ep.path))
                    .or_else(|| endpoints.iter().find(|ep| paths_match(&target_path, &ep.path)));
                if let Some(ep) = hit {
                    flow.linked_endpoint_id = Some(ep.id.clone());
                    page.linked_endpoint_ids.insert(ep.id.clone());
                }
            }
            flow
        })
        .collect();

    page
}
