//! Classification pipeline — shared types, rules engine, orchestrator.

pub mod processor;
pub mod rules;
pub mod types;

pub use processor::Processor;
pub use types::{Category, Classification, ClassifyOutcome};
