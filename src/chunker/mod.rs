pub mod auth_strategy;
pub mod chunker;
pub mod domain;
