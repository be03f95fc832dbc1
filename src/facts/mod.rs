pub mod error;
pub mod extractor;
pub mod fact_model;
pub mod ids;
pub mod ingest;
pub mod normalize;
