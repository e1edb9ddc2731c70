//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `pipeline.rs` — derive/form/docs/workflow: read inputs, run services, write artifacts.
//! - `check.rs` — form sync validation.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `benefit_inputs::services`.
//! - Keep behavior and output schema stable.
//! - Handlers return `Ok(None)` for commands they do not own.

pub mod check;
pub mod pipeline;

pub use check::handle_check_commands;
pub use pipeline::handle_pipeline_commands;
