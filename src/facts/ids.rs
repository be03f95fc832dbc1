use sha1::{Digest, Sha1};

use crate::facts::fact_model::HttpMethod;

// ============================================================================
// Content-addressed entity IDs
// ============================================================================
//
// IDs are short hashes of an entity's normalized identity key, so they
// are stable across runs and independent of fact arrival order. No
// process-wide counters.

fn short_hash(input: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let hex = format!("{:x}", digest);
    hex[..12].to_string()
}

pub fn endpoint_id(method: HttpMethod, normalized_path: &str) -> String {
    format!("ep-{}", short_hash(&format!("{} {}", method.as_str(), normalized_path)))
}

pub fn page_id(route: &str) -> String {
    format!("pg-{}", short_hash(route))
}

pub fn locator_id(route: &str, selector: &str) -> String {
    format!("loc-{}", short_hash(&format!("{}::{}", route, selector)))
}

pub fn form_flow_id(route: &str, form_name: &str) -> String {
    format!("ff-{}", short_hash(&format!("{}::{}", route, form_name)))
}
