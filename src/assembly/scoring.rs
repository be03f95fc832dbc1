use crate::facts::fact_model::{Endpoint, EndpointFlag, Page, RequestBody};

// ============================================================================
// Confidence recompute
// ============================================================================
//
// Heuristic uncertainty lives in the confidence score and flag set, not
// in error propagation. Scores always land in [0, 1].

pub fn score_endpoint(mut ep: Endpoint) -> Endpoint {
    ep.confidence = endpoint_confidence(&ep);
    ep
}

/// Recompute a merged endpoint's confidence from 1.0.
///
/// The body-source penalty applies to body-bearing methods only: a GET
/// or DELETE without a request body is the expected shape.
pub fn endpoint_confidence(ep: &Endpoint) -> f32 {
    let mut score: f32 = 1.0;

    if ep.flags.contains(&EndpointFlag::UnresolvedPathPrefix) {
        score -= 0.20;
    }
    if ep.flags.contains(&EndpointFlag::DynamicPath) {
        score -= 0.15;
    }
    if ep.flags.contains(&EndpointFlag::ConditionalRoute) {
        score -= 0.10;
    }

    if ep.method.carries_body() {
        score -= match &ep.request_body {
            RequestBody::None => 0.25,
            RequestBody::Inferred { .. } => 0.15,
            RequestBody::Typed { .. } => 0.10,
            RequestBody::Validated { .. } => 0.0,
        };
    }

    if ep.auth_required && ep.auth_type.is_none() {
        score -= 0.10;
    }

    score.clamp(0.0, 1.0)
}

pub fn score_page(mut page: Page) -> Page {
    page.confidence = page_confidence(&page);
    page
}

/// Page confidence: base extraction confidence, penalized for dynamic
/// routes and for carrying no locators at all.
pub fn page_confidence(page: &Page) -> f32 {
    let mut score = page.confidence;

    if page.is_dynamic {
        score -= 0.05;
    }
    if page.locators.is_empty() {
        score -= 0.20;
    }

    score.clamp(0.0, 1.0)
}
