use std::fs;
use std::path::Path;

use crate::assembly::blueprint_model::Blueprint;
use crate::chunker::chunker::{chunk, BlueprintChunk};
use crate::cli::config::AppConfig;
use crate::facts::error::BlueprintError;
use crate::facts::ingest::{
    ingest_auth, ingest_components, ingest_endpoints, ingest_pages, FactIssue, FactsFile,
};
use crate::report::console::{format_blueprint_report, format_chunk_report};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{now_ms, TraceEvent};
use crate::{run_pipeline, PipelineInput};

// ============================================================================
// assemble subcommand
// ============================================================================

pub fn cmd_assemble(
    facts_path: &str,
    output_dir: Option<&str>,
    trace_path: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<(), BlueprintError> {
    let raw = read_file(facts_path)?;
    let facts: FactsFile =
        serde_json::from_str(&raw).map_err(|e| BlueprintError::JsonParse {
            context: facts_path.to_string(),
            source: e,
        })?;

    let tracer = match trace_path.or(config.trace.file.as_deref()) {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let (endpoints, endpoint_issues) = ingest_endpoints(&facts.endpoints);
    let (pages, page_issues) = ingest_pages(&facts.pages);
    let (components, component_issues) = ingest_components(&facts.components);
    let (auth, auth_issues) = ingest_auth(facts.auth.as_ref());

    report_issues(&tracer, &endpoint_issues);
    report_issues(&tracer, &page_issues);
    report_issues(&tracer, &component_issues);
    report_issues(&tracer, &auth_issues);

    if verbose > 0 {
        eprintln!(
            "Ingested {} endpoints, {} pages, {} components ({} facts skipped)",
            endpoints.len(),
            pages.len(),
            components.len(),
            endpoint_issues.len() + page_issues.len() + component_issues.len() + auth_issues.len()
        );
    }

    let output = run_pipeline(
        PipelineInput {
            endpoints,
            pages,
            components,
            auth,
        },
        &tracer,
    );

    let dir = output_dir.unwrap_or(&config.output.dir);
    write_outputs(dir, &output.blueprint, &output.chunks, config.output.pretty)?;

    println!(
        "Assembled {} endpoints and {} pages into {} chunks -> {}",
        output.blueprint.endpoints.len(),
        output.blueprint.pages.len(),
        output.chunks.len(),
        dir
    );

    Ok(())
}

fn report_issues(tracer: &TraceLogger, issues: &[FactIssue]) {
    for issue in issues {
        eprintln!(
            "Warning: skipped {} fact #{}: {}",
            issue.kind, issue.index, issue.message
        );
        tracer.log(&TraceEvent::FactSkipped {
            timestamp_ms: now_ms(),
            kind: issue.kind.to_string(),
            index: issue.index,
            reason: issue.message.clone(),
        });
    }
}

// ============================================================================
// chunk subcommand
// ============================================================================

pub fn cmd_chunk(
    blueprint_path: &str,
    output_dir: Option<&str>,
    config: &AppConfig,
) -> Result<(), BlueprintError> {
    let blueprint = read_blueprint(blueprint_path)?;
    let chunks = chunk(&blueprint);

    let dir = output_dir.unwrap_or(&config.output.dir);
    write_chunks(dir, &chunks, config.output.pretty)?;

    print!("{}", format_chunk_report(&chunks));
    Ok(())
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(blueprint_path: &str) -> Result<(), BlueprintError> {
    let blueprint = read_blueprint(blueprint_path)?;
    print!("{}", format_blueprint_report(&blueprint));

    let chunks = chunk(&blueprint);
    print!("\n{}", format_chunk_report(&chunks));
    Ok(())
}

// ============================================================================
// File helpers
// ============================================================================

fn read_file(path: &str) -> Result<String, BlueprintError> {
    fs::read_to_string(path).map_err(|e| BlueprintError::Io {
        context: path.to_string(),
        source: e,
    })
}

fn read_blueprint(path: &str) -> Result<Blueprint, BlueprintError> {
    let raw = read_file(path)?;
    serde_json::from_str(&raw).map_err(|e| BlueprintError::JsonParse {
        context: path.to_string(),
        source: e,
    })
}

fn to_json<T: serde::Serialize>(value: &T, context: &str, pretty: bool) -> Result<String, BlueprintError> {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|e| BlueprintError::JsonSerialize {
        context: context.to_string(),
        source: e,
    })
}

fn write_outputs(
    dir: &str,
    blueprint: &Blueprint,
    chunks: &[BlueprintChunk],
    pretty: bool,
) -> Result<(), BlueprintError> {
    fs::create_dir_all(dir).map_err(|e| BlueprintError::Io {
        context: dir.to_string(),
        source: e,
    })?;

    let blueprint_path = Path::new(dir).join("blueprint.json");
    let json = to_json(blueprint, "blueprint", pretty)?;
    fs::write(&blueprint_path, json).map_err(|e| BlueprintError::Io {
        context: blueprint_path.display().to_string(),
        source: e,
    })?;

    write_chunks(dir, chunks, pretty)
}

fn write_chunks(dir: &str, chunks: &[BlueprintChunk], pretty: bool) -> Result<(), BlueprintError> {
    let chunks_dir = Path::new(dir).join("chunks");
    fs::create_dir_all(&chunks_dir).map_err(|e| BlueprintError::Io {
        context: chunks_dir.display().to_string(),
        source: e,
    })?;

    for c in chunks {
        let stem = c.output_name.split('.').next().unwrap_or(&c.domain);
        let path = chunks_dir.join(format!("{}.json", stem));
        let json = to_json(c, &c.output_name, pretty)?;
        fs::write(&path, json).map_err(|e| BlueprintError::Io {
            context: path.display().to_string(),
            source: e,
        })?;
    }

    Ok(())
}
