//! Derives the inputs a benefit's DMN decision models consult, and turns them
//! into a canonical schema, a form-js form and markdown docs.
//!
//! ## Layout
//! - `dmn.rs` — DMN XML reader and the crate's error type.
//! - `domain/` — data-only models, config and diagnostics.
//! - `services/` — the pipeline stages.

pub mod dmn;
pub mod domain;
pub mod services;

pub use dmn::DmnError;
pub use domain::config::PipelineConfig;
pub use domain::diagnostics::{Diagnostic, Diagnostics};
pub use domain::models::{CanonicalSchema, FormSchema, SyncMode, SyncReport};
pub use services::assembler::derive_inputs;
