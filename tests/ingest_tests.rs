mod common;

use blueprint_assembly::assembly::blueprint_model::Blueprint;
use blueprint_assembly::assembly::merge::assemble;
use blueprint_assembly::chunker::chunker::{chunk, BlueprintChunk};
use blueprint_assembly::facts::fact_model::{AuthMechanism, HttpMethod};
use blueprint_assembly::facts::ingest::{ingest_auth, ingest_endpoints, ingest_pages};
use blueprint_assembly::locator::resolve_page::resolve_page;
use blueprint_assembly::registry::component_registry::ComponentRegistry;
use common::{element, endpoint, page_fact, with_attr};
use serde_json::json;

// =========================================================================
// Malformed facts are skipped, not fatal
// =========================================================================

#[test]
fn malformed_endpoint_fact_is_skipped_and_reported() {
    let values = vec![
        json!({ "method": "GET", "path": "/api/users" }),
        json!({ "method": "FETCH", "path": "/api/bad" }),
        json!({ "method": "POST", "path": "/api/users" }),
    ];

    let (endpoints, issues) = ingest_endpoints(&values);
    assert_eq!(endpoints.len(), 2, "valid facts survive the bad one");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, "endpoint");
    assert_eq!(issues[0].index, 1);
}

#[test]
fn out_of_range_confidence_is_malformed() {
    let values = vec![json!({ "method": "GET", "path": "/api/users", "confidence": 1.7 })];
    let (endpoints, issues) = ingest_endpoints(&values);
    assert!(endpoints.is_empty());
    assert_eq!(issues.len(), 1);
}

#[test]
fn empty_path_is_malformed() {
    let values = vec![json!({ "method": "GET", "path": "  " })];
    let (endpoints, issues) = ingest_endpoints(&values);
    assert!(endpoints.is_empty());
    assert_eq!(issues.len(), 1);
}

#[test]
fn malformed_page_fact_is_skipped() {
    let values = vec![
        json!({ "title": "Login", "filePath": "src/pages/login.tsx", "route": "/login" }),
        json!({ "title": 42 }),
    ];
    let (pages, issues) = ingest_pages(&values);
    assert_eq!(pages.len(), 1);
    assert_eq!(issues.len(), 1);
}

#[test]
fn malformed_auth_degrades_to_none_with_issue() {
    let (auth, issues) = ingest_auth(Some(&json!({ "mechanism": "telepathy" })));
    assert!(auth.is_none());
    assert_eq!(issues.len(), 1);

    let (auth, issues) = ingest_auth(Some(&json!({
        "mechanism": "sessionCookie",
        "authCookieName": "sid"
    })));
    let auth = auth.expect("well-formed auth parses");
    assert_eq!(auth.mechanism, AuthMechanism::SessionCookie);
    assert!(issues.is_empty());
}

// =========================================================================
// Lossless persistence round-trips
// =========================================================================

#[test]
fn blueprint_json_round_trips_losslessly() {
    let registry = ComponentRegistry::new();

    let mut fact = page_fact(Some("/login"), "Login", "src/pages/login.tsx");
    fact.elements = vec![
        with_attr(element("input"), "type", "password"),
        with_attr(element("button"), "data-testid", "submit"),
    ];
    fact.api_calls = vec!["/api/auth/login".to_string()];

    let mut secured = endpoint(HttpMethod::Post, "/api/auth/login");
    secured.auth_required = true;
    secured.auth_type = Some("session_cookie".to_string());
    secured.roles.insert("member".to_string());

    let blueprint = assemble(
        vec![secured, endpoint(HttpMethod::Get, "/api/users")],
        vec![resolve_page(&fact, &registry)],
        None,
    );

    let json = serde_json::to_string(&blueprint).expect("serializes");
    let restored: Blueprint = serde_json::from_str(&json).expect("deserializes");

    assert_eq!(
        serde_json::to_value(&blueprint).unwrap(),
        serde_json::to_value(&restored).unwrap(),
        "blueprint JSON must round-trip losslessly"
    );
}

#[test]
fn chunk_json_round_trips_losslessly() {
    let blueprint = assemble(
        vec![
            endpoint(HttpMethod::Get, "/api/v1/users"),
            endpoint(HttpMethod::Post, "/api/v1/users"),
        ],
        vec![],
        None,
    );
    let chunks = chunk(&blueprint);

    let json = serde_json::to_string(&chunks).expect("serializes");
    let restored: Vec<BlueprintChunk> = serde_json::from_str(&json).expect("deserializes");

    assert_eq!(
        serde_json::to_value(&chunks).unwrap(),
        serde_json::to_value(&restored).unwrap(),
        "chunk JSON must round-trip losslessly"
    );
}
