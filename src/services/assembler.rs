use crate::dmn::DmnError;
use crate::domain::config::{PipelineConfig, RootTypes};
use crate::domain::diagnostics::{Diagnostic, Diagnostics};
use crate::domain::document::{is_top_level, DecisionDocument};
use crate::domain::models::{
    CanonicalSchema, FieldSpec, ModelRef, RequiredInputs, ResolvedField, SchemaMetadata,
};
use crate::services::feel::{extract_field_references, ExtractedFields};
use crate::services::imports::{ImportGraph, ImportResolver};
use crate::services::types::{TypeCatalog, TypeResolver};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Run-specific values stamped onto the schema.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub types: RootTypes,
    pub version: String,
    pub generated_at: DateTime<Utc>,
}

impl AssembleOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            types: config.types.clone(),
            version: config.schema.version.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// Builds the canonical schema from a resolved graph. Fields whose type
/// cannot be resolved are left out and reported in the returned diagnostics,
/// which also carry the graph's own warnings.
pub fn assemble(
    graph: &ImportGraph,
    catalog: &TypeCatalog,
    fields: &ExtractedFields,
    opts: &AssembleOptions,
) -> (CanonicalSchema, Diagnostics) {
    let mut diagnostics = graph.diagnostics.clone();

    let person = resolve_root(catalog, &fields.person, &opts.types.person, &mut diagnostics);
    let situation = resolve_root(
        catalog,
        &fields.situation,
        &opts.types.situation,
        &mut diagnostics,
    );

    let root = graph.root();
    let metadata = SchemaMetadata {
        total_documents: graph.len(),
        person_field_count: person.len(),
        situation_field_count: situation.len(),
        models: graph.documents().iter().map(model_ref).collect(),
    };

    let schema = CanonicalSchema {
        benefit: benefit_name(root),
        version: opts.version.clone(),
        generated_at: opts
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        source_document: display_relative(&root.path),
        required_inputs: RequiredInputs { person, situation },
        metadata,
    };
    (schema, diagnostics)
}

/// Resolves the top-level `names` under `root_type`. An undeclared root type
/// is reported once by the resolver, not once per field.
fn resolve_root(
    catalog: &TypeCatalog,
    names: &BTreeSet<String>,
    root_type: &str,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, FieldSpec> {
    let resolver = TypeResolver::new(catalog);
    let root_declared = catalog.get(root_type).is_some();
    let mut out = BTreeMap::new();
    for name in names.iter().filter(|n| is_top_level(n)) {
        match resolver.resolve(name, root_type, diagnostics) {
            Some(resolved) => {
                out.insert(name.clone(), to_field_spec(resolved));
            }
            None if root_declared => diagnostics.push(Diagnostic::MissingType {
                root: root_type.to_string(),
                field: name.clone(),
            }),
            None => {}
        }
    }
    out
}

fn to_field_spec(resolved: ResolvedField) -> FieldSpec {
    let mut builder = FieldSpec::builder(resolved.type_name, resolved.is_collection);
    if let Some(primitive) = resolved.primitive {
        builder = builder.primitive(primitive);
    }
    if let Some(item_type) = resolved.item_type {
        builder = builder.item_type(item_type);
    }
    if let Some(fields) = resolved.fields {
        builder = builder.fields(fields);
    }
    builder.build()
}

/// The root model's declared name, or its file stem when it has none.
pub fn benefit_name(doc: &DecisionDocument) -> String {
    doc.model_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            doc.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_default()
}

fn model_ref(doc: &DecisionDocument) -> ModelRef {
    ModelRef {
        name: benefit_name(doc),
        path: display_relative(&doc.path),
        input_data: doc.input_data.clone(),
    }
}

/// `path` relative to the working directory when it lies below it.
fn display_relative(path: &Path) -> String {
    let cwd = std::env::current_dir().and_then(|d| d.canonicalize());
    match cwd {
        Ok(cwd) => match path.strip_prefix(&cwd) {
            Ok(rel) => rel.display().to_string(),
            Err(_) => path.display().to_string(),
        },
        Err(_) => path.display().to_string(),
    }
}

/// Resolves, scans and assembles in one go, starting from a benefit document.
pub fn derive_inputs(
    root: &Path,
    config: &PipelineConfig,
) -> anyhow::Result<(CanonicalSchema, Diagnostics)> {
    let graph = ImportResolver::new(&config.resolver).resolve(root)?;
    let type_doc = graph
        .find_by_file_name(&config.resolver.type_document)
        .ok_or_else(|| DmnError::TypeDocumentNotFound {
            name: config.resolver.type_document.clone(),
            root: graph.root().path.clone(),
        })?;
    tracing::debug!(path = %type_doc.path.display(), "using type document");

    let catalog = TypeCatalog::from_document(type_doc);
    tracing::debug!(types = ?catalog.type_names(), "loaded type catalog");
    let fields = extract_field_references(graph.documents());
    let (schema, diagnostics) = assemble(
        &graph,
        &catalog,
        &fields,
        &AssembleOptions::from_config(config),
    );
    tracing::debug!(
        benefit = %schema.benefit,
        fields = schema.field_count(),
        warnings = diagnostics.len(),
        "assembled input schema"
    );
    Ok((schema, diagnostics))
}
