use serde::{Deserialize, Serialize};

use crate::facts::fact_model::{Endpoint, PageFact};

// ============================================================================
// Extractor boundary
// ============================================================================
//
// Framework extractors live outside this crate; this module defines the
// closed trait they implement and the registry that dispatches them once
// at pipeline start from the framework-detection result.

/// A framework detected in the target repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Framework {
    Express,
    Fastify,
    Koa,
    Nestjs,
    Nextjs,
    Remix,
    React,
    Vue,
    Angular,
    Svelte,
}

/// A source file handed to extractors, already read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
}

/// Produces `Endpoint` facts for the frameworks it understands.
pub trait RouteExtractor {
    fn name(&self) -> &'static str;
    fn can_handle(&self, frameworks: &[Framework]) -> bool;
    fn extract(&self, files: &[SourceFile]) -> Vec<Endpoint>;
}

/// Produces raw `PageFact`s for the UI frameworks it understands.
pub trait PageExtractor {
    fn name(&self) -> &'static str;
    fn can_handle(&self, frameworks: &[Framework]) -> bool;
    fn extract(&self, files: &[SourceFile]) -> Vec<PageFact>;
}

/// Registered extractor implementations, resolved against the detected
/// frameworks once at pipeline start.
#[derive(Default)]
pub struct ExtractorRegistry {
    routes: Vec<Box<dyn RouteExtractor>>,
    pages: Vec<Box<dyn PageExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_routes(&mut self, extractor: Box<dyn RouteExtractor>) {
        self.routes.push(extractor);
    }

    pub fn register_pages(&mut self, extractor: Box<dyn PageExtractor>) {
        self.pages.push(extractor);
    }

    /// Run every applicable route extractor over the files and collect
    /// the raw (possibly duplicated) endpoint facts.
    pub fn extract_endpoints(
        &self,
        frameworks: &[Framework],
        files: &[SourceFile],
    ) -> Vec<Endpoint> {
        self.routes
            .iter()
            .filter(|e| e.can_handle(frameworks))
            .flat_map(|e| e.extract(files))
            .collect()
    }

    /// Run every applicable page extractor over the files.
    pub fn extract_pages(&self, frameworks: &[Framework], files: &[SourceFile]) -> Vec<PageFact> {
        self.pages
            .iter()
            .filter(|e| e.can_handle(frameworks))
            .flat_map(|e| e.extract(files))
            .collect()
    }
}
