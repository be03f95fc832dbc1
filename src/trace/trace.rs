use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

// ============================================================================
// Pipeline trace events (one JSONL line per stage milestone)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    FactSkipped {
        timestamp_ms: u128,
        kind: String,
        index: usize,
        reason: String,
    },
    RegistryBuilt {
        timestamp_ms: u128,
        components: usize,
        templates: usize,
    },
    PageResolved {
        timestamp_ms: u128,
        route: String,
        locators: usize,
        form_flows: usize,
    },
    BlueprintAssembled {
        timestamp_ms: u128,
        raw_endpoints: usize,
        endpoints: usize,
        raw_pages: usize,
        pages: usize,
    },
    ChunksEmitted {
        timestamp_ms: u128,
        chunks: usize,
        domains: usize,
    },
}

pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
