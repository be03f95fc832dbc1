use serde::Deserialize;
use serde_json::Value;

use crate::facts::fact_model::{AuthFact, Endpoint, PageFact};
use crate::registry::component_registry::ComponentSource;

// ============================================================================
// Fact-stream ingestion
// ============================================================================
//
// Fact streams arrive as raw JSON values so one malformed fact never
// poisons the rest: the bad value is skipped, recorded as an issue, and
// processing continues.

/// A skipped input fact and why it was skipped.
#[derive(Debug, Clone)]
pub struct FactIssue {
    pub kind: &'static str,
    pub index: usize,
    pub message: String,
}

/// The on-disk facts file: raw per-kind streams plus the global auth fact.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FactsFile {
    #[serde(default)]
    pub endpoints: Vec<Value>,

    #[serde(default)]
    pub pages: Vec<Value>,

    #[serde(default)]
    pub components: Vec<Value>,

    #[serde(default)]
    pub auth: Option<Value>,
}

fn sane_confidence(confidence: f32) -> bool {
    confidence.is_finite() && (0.0..=1.0).contains(&confidence)
}

pub fn ingest_endpoints(values: &[Value]) -> (Vec<Endpoint>, Vec<FactIssue>) {
    let mut endpoints = Vec::with_capacity(values.len());
    let mut issues = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match serde_json::from_value::<Endpoint>(value.clone()) {
            Ok(ep) if ep.path.trim().is_empty() => issues.push(FactIssue {
                kind: "endpoint",
                index,
                message: "empty path".to_string(),
            }),
            Ok(ep) if !sane_confidence(ep.confidence) => issues.push(FactIssue {
                kind: "endpoint",
                index,
                message: format!("confidence {} outside [0,1]", ep.confidence),
            }),
            Ok(ep) => endpoints.push(ep),
            Err(e) => issues.push(FactIssue {
                kind: "endpoint",
                index,
                message: e.to_string(),
            }),
        }
    }

    (endpoints, issues)
}

pub fn ingest_pages(values: &[Value]) -> (Vec<PageFact>, Vec<FactIssue>) {
    let mut pages = Vec::with_capacity(values.len());
    let mut issues = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match serde_json::from_value::<PageFact>(value.clone()) {
            Ok(pf) if pf.file_path.trim().is_empty() => issues.push(FactIssue {
                kind: "page",
                index,
                message: "empty filePath".to_string(),
            }),
            Ok(pf) if !sane_confidence(pf.confidence) => issues.push(FactIssue {
                kind: "page",
                index,
                message: format!("confidence {} outside [0,1]", pf.confidence),
            }),
            Ok(pf) => pages.push(pf),
            Err(e) => issues.push(FactIssue {
                kind: "page",
                index,
                message: e.to_string(),
            }),
        }
    }

    (pages, issues)
}

pub fn ingest_components(values: &[Value]) -> (Vec<ComponentSource>, Vec<FactIssue>) {
    let mut sources = Vec::with_capacity(values.len());
    let mut issues = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match serde_json::from_value::<ComponentSource>(value.clone()) {
            Ok(src) if src.file_path.trim().is_empty() => issues.push(FactIssue {
                kind: "component",
                index,
                message: "empty filePath".to_string(),
            }),
            Ok(src) => sources.push(src),
            Err(e) => issues.push(FactIssue {
                kind: "component",
                index,
                message: e.to_string(),
            }),
        }
    }

    (sources, issues)
}

/// Parse the optional global auth fact. A malformed auth fact degrades
/// to "no auth detected" with one recorded issue.
pub fn ingest_auth(value: Option<&Value>) -> (Option<AuthFact>, Vec<FactIssue>) {
    match value {
        None => (None, Vec::new()),
        Some(v) => match serde_json::from_value::<AuthFact>(v.clone()) {
            Ok(auth) => (Some(auth), Vec::new()),
            Err(e) => (
                None,
                vec![FactIssue {
                    kind: "auth",
                    index: 0,
                    message: e.to_string(),
                }],
            ),
        },
    }
}
