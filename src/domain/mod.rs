//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep parsed-document, schema, form and report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON artifact shape changes explicit and reviewable.
//!
//! ## Files
//! - `document.rs` — parsed decision documents, imports, type definitions.
//! - `models.rs` — canonical schema, form schema, sync report, output envelope.
//! - `config.rs` — pipeline configuration (TOML, every field defaulted).
//! - `diagnostics.rs` — non-fatal warnings collected during a run.
//! - `constants.rs` — stable names (primitive kinds, exempt fields, form ids).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in `models.rs` affect the persisted artifacts. Keep them
//! synchronized with `docs/contracts/*`.

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod document;
pub mod models;
