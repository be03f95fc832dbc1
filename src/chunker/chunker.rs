use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::assembly::blueprint_model::Blueprint;
use crate::chunker::auth_strategy::{classify_auth_strategy, AuthStrategy};
use crate::chunker::domain::domain_key;
use crate::facts::fact_model::{CredentialFields, Endpoint, EndpointFlag, Page, StepAction};

// ============================================================================
// Domain chunker
// ============================================================================
//
// Groups the blueprint by domain, splits oversized groups into fixed
// windows, and pairs endpoint/page sub-chunks by index into bounded,
// auth-annotated output units.

pub const MAX_ENDPOINTS_PER_CHUNK: usize = 5;
pub const MAX_PAGES_PER_CHUNK: usize = 10;

/// Seed data carried with each chunk for the downstream generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDataHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialFields>,

    /// Field label → suggested fill value, collected from the chunk's
    /// form flows.
    #[serde(default)]
    pub field_values: BTreeMap<String, String>,
}

/// One bounded work unit of the blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintChunk {
    pub domain: String,
    pub has_pages: bool,

    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    #[serde(default)]
    pub pages: Vec<Page>,

    pub auth_strategy: AuthStrategy,
    pub output_name: String,

    #[serde(default)]
    pub test_data_hints: TestDataHints,
}

/// Partition the blueprint into bounded chunks. A non-empty blueprint
/// always yields at least one chunk.
pub fn chunk(blueprint: &Blueprint) -> Vec<BlueprintChunk> {
    let auth_strategy = classify_auth_strategy(blueprint.auth.as_ref());
    let credentials = blueprint
        .auth
        .as_ref()
        .and_then(|a| a.credentials.clone());

    // Independent grouping of endpoints and pages, ordered by domain.
    let mut endpoint_groups: BTreeMap<String, Vec<Endpoint>> = BTreeMap::new();
    for ep in &blueprint.endpoints {
        endpoint_groups
            .entry(domain_key(&ep.path))
            .or_default()
            .push(ep.clone());
    }

    let mut page_groups: BTreeMap<String, Vec<Page>> = BTreeMap::new();
    for page in &blueprint.pages {
        page_groups
            .entry(domain_key(&page.route))
            .or_default()
            .push(page.clone());
    }

    let domains: BTreeSet<String> = endpoint_groups
        .keys()
        .chain(page_groups.keys())
        .cloned()
        .collect();

    let mut chunks = Vec::new();
    for domain in domains {
        let mut endpoints = endpoint_groups.remove(&domain).unwrap_or_default();
        let mut pages = page_groups.remove(&domain).unwrap_or_default();

        // Deterministic split order
        endpoints.sort_by(|a, b| (a.path.as_str(), a.method).cmp(&(b.path.as_str(), b.method)));
        pages.sort_by(|a, b| a.route.cmp(&b.route));

        let endpoint_windows = windows(endpoints, MAX_ENDPOINTS_PER_CHUNK);
        let page_windows = windows(pages, MAX_PAGES_PER_CHUNK);

        let sub_chunks = endpoint_windows.len().max(page_windows.len());
        let mut endpoint_windows = endpoint_windows.into_iter();
        let mut page_windows = page_windows.into_iter();

        // Pair the i-th endpoint sub-chunk with the i-th page sub-chunk.
        for i in 0..sub_chunks {
            let endpoints = endpoint_windows.next().unwrap_or_default();
            let pages = page_windows.next().unwrap_or_default();
            if endpoints.is_empty() && pages.is_empty() {
                continue;
            }

            let name = if sub_chunks == 1 {
                domain.clone()
            } else {
                format!("{}-{}", domain, i + 1)
            };
            let has_pages = !pages.is_empty()
                || endpoints
                    .iter()
                    .any(|ep| ep.flags.contains(&EndpointFlag::ReturnsHtml));
            let output_name = format!(
                "{}.{}.spec.ts",
                name,
                if has_pages { "ui" } else { "api" }
            );

            let test_data_hints = TestDataHints {
                credentials: credentials.clone(),
                field_values: collect_field_values(&pages),
            };

            chunks.push(BlueprintChunk {
                domain: domain.clone(),
                has_pages,
                endpoints,
                pages,
                auth_strategy,
                output_name,
                test_data_hints,
            });
        }
    }

    debug_assert!(
        blueprint.is_empty() || !chunks.is_empty(),
        "non-empty blueprint produced zero chunks"
    );
    chunks
}

fn windows<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(items.len().div_ceil(size));
    let mut current = Vec::with_capacity(size);
    for item in items {
        current.push(item);
        if current.len() == size {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn collect_field_values(pages: &[Page]) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for page in pages {
        for flow in &page.form_flows {
            for step in &flow.steps {
                if let (StepAction::Fill | StepAction::Select, Some(value)) =
                    (step.action, step.test_value.as_ref())
                {
                    let label = page
                        .locators
                        .iter()
                        .find(|l| l.selector == step.selector)
                        .map(|l| l.name.clone())
                        .unwrap_or_else(|| step.field_kind.clone());
                    values.entry(label).or_insert_with(|| value.clone());
                }
            }
        }
    }
    values
}
