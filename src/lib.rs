use std::collections::BTreeSet;

use crate::assembly::blueprint_model::Blueprint;
use crate::assembly::merge::assemble;
use crate::chunker::chunker::{chunk, BlueprintChunk};
use crate::facts::fact_model::{AuthFact, Endpoint, Page, PageFact};
use crate::locator::resolve_page::resolve_page;
use crate::registry::component_registry::{build_registry, ComponentSource};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{now_ms, TraceEvent};

pub mod assembly;
pub mod chunker;
pub mod cli;
pub mod facts;
pub mod locator;
pub mod registry;
pub mod report;
pub mod trace;

/// Ingested fact streams, ready for assembly. Producers may emit
/// duplicates and partial entries; the pipeline normalizes both.
pub struct PipelineInput {
    pub endpoints: Vec<Endpoint>,
    pub pages: Vec<PageFact>,
    pub components: Vec<ComponentSource>,
    pub auth: Option<AuthFact>,
}

pub struct PipelineOutput {
    pub blueprint: Blueprint,
    pub chunks: Vec<BlueprintChunk>,
}

/// Run the four pipeline stages: component registry pre-pass, locator
/// resolution, blueprint assembly, domain chunking. Each stage is a
/// pure function over the previous stage's output.
pub fn run_pipeline(input: PipelineInput, tracer: &TraceLogger) -> PipelineOutput {
    // ---- Component Registry pre-pass ----
    let registry = build_registry(&input.components);
    tracer.log(&TraceEvent::RegistryBuilt {
        timestamp_ms: now_ms(),
        components: registry.component_count(),
        templates: registry.template_count(),
    });

    // ---- Locator resolution ----
    let raw_pages = input.pages.len();
    let pages: Vec<Page> = input
        .pages
        .iter()
        .map(|fact| {
            let page = resolve_page(fact, &registry);
            tracer.log(&TraceEvent::PageResolved {
                timestamp_ms: now_ms(),
                route: page.route.clone(),
                locators: page.locators.len(),
                form_flows: page.form_flows.len(),
            });
            page
        })
        .collect();

    // ---- Blueprint assembly ----
    let raw_endpoints = input.endpoints.len();
    let blueprint = assemble(input.endpoints, pages, input.auth);
    tracer.log(&TraceEvent::BlueprintAssembled {
        timestamp_ms: now_ms(),
        raw_endpoints,
        endpoints: blueprint.endpoints.len(),
        raw_pages,
        pages: blueprint.pages.len(),
    });

    // ---- Domain chunking ----
    let chunks = chunk(&blueprint);
    let domains: BTreeSet<&str> = chunks.iter().map(|c| c.domain.as_str()).collect();
    tracer.log(&TraceEvent::ChunksEmitted {
        timestamp_ms: now_ms(),
        chunks: chunks.len(),
        domains: domains.len(),
    });

    PipelineOutput { blueprint, chunks }
}
