//! Triagem — email productivity triage service.
//!
//! Classifies email-like text as `Produtivo` or `Improdutivo` and suggests a
//! reply. A deterministic rules engine handles every request; an optional
//! remote LLM backend can take over, with transparent fallback to the rules
//! engine whenever it fails.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
