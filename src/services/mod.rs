//! Service layer containing the pipeline stages and side-effect helpers.
//!
//! ## Service map
//! - `imports.rs` — import graph walk with resources-directory fallback.
//! - `feel.rs` — person/situation field references in FEEL text.
//! - `types.rs` — type catalog and one-level type resolution.
//! - `assembler.rs` — canonical schema assembly and the end-to-end derive.
//! - `form.rs` — form-js generation and labels.
//! - `sync.rs` — form/schema sync check and its text report.
//! - `docs.rs` — markdown input documentation.
//! - `storage.rs` — config loading and artifact read/write.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod assembler;
pub mod docs;
pub mod feel;
pub mod form;
pub mod imports;
pub mod output;
pub mod storage;
pub mod sync;
pub mod types;
