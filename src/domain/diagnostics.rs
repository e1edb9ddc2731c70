use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A non-fatal problem found during a run. Nothing here aborts the pipeline,
/// but each one explains an import or field that silently went missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An import whose target could not be found by any strategy.
    UnresolvedImport { location: String, from: PathBuf },
    /// An import element without a `locationURI`.
    MissingImportLocation { from: PathBuf },
    /// A referenced field with no declaration under its root type.
    MissingType { root: String, field: String },
    /// The root type itself is not declared; every field under it is dropped.
    MissingParentType { root: String },
    /// A declared field without a `typeRef`.
    MissingTypeRef { root: String, field: String },
    /// A complex type reference with no matching definition.
    UnknownComplexType { type_name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedImport { location, from } => write!(
                f,
                "could not find imported DMN file: {location} (referenced from {})",
                from.display()
            ),
            Diagnostic::MissingImportLocation { from } => {
                write!(f, "import in {} missing locationURI attribute", from.display())
            }
            Diagnostic::MissingType { root, field } => {
                write!(f, "field {field} is not declared in {root}; dropped from schema")
            }
            Diagnostic::MissingParentType { root } => {
                write!(f, "parent type {root} not found in type document")
            }
            Diagnostic::MissingTypeRef { root, field } => {
                write!(f, "no typeRef found for field {field} in {root}")
            }
            Diagnostic::UnknownComplexType { type_name } => {
                write!(f, "complex type {type_name} not found in type document")
            }
        }
    }
}

/// Ordered, de-duplicated collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `d` once and logs it the first time it is seen.
    pub fn push(&mut self, d: Diagnostic) {
        if self.items.contains(&d) {
            return;
        }
        tracing::warn!("{d}");
        self.items.push(d);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.items.iter().map(|d| d.to_string()).collect()
    }
}
