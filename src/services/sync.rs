use crate::domain::constants::AUTO_POPULATED_FIELDS;
use crate::domain::models::{
    CanonicalSchema, ComponentKind, FieldSpec, FormComponent, FormSchema, SyncMode, SyncReport,
};
use std::collections::{BTreeMap, BTreeSet};

/// Field ids a form collects. Groups only contribute their children; the
/// children of a dynamic list are prefixed with the list id.
pub fn extract_form_field_ids(components: &[FormComponent]) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for component in components {
        if component.kind == ComponentKind::Group {
            ids.extend(extract_form_field_ids(component.children()));
            continue;
        }
        if let Some(id) = component.id.as_deref() {
            ids.insert(id.to_string());
        }
        let children = extract_form_field_ids(component.children());
        match (component.kind, component.id.as_deref()) {
            (ComponentKind::Dynamiclist, Some(list)) => {
                ids.extend(children.into_iter().map(|c| format!("{list}.{c}")));
            }
            _ => ids.extend(children),
        }
    }
    ids
}

/// Field ids the schema expects: every top-level name of both roots plus
/// `name.sub` for each expanded sub-field.
pub fn extract_schema_field_ids(schema: &CanonicalSchema) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    let roots: [&BTreeMap<String, FieldSpec>; 2] = [
        &schema.required_inputs.person,
        &schema.required_inputs.situation,
    ];
    for (name, spec) in roots.into_iter().flatten() {
        ids.insert(name.clone());
        for sub in spec.fields.iter().flat_map(|f| f.keys()) {
            ids.insert(format!("{name}.{sub}"));
        }
    }
    ids
}

fn is_auto_populated(id: &str) -> bool {
    AUTO_POPULATED_FIELDS.contains(&id)
}

/// Checks that `form` still collects every field `schema` needs.
///
/// A schema field counts as collected when some form id equals it or contains
/// it. Extra form fields only fail the check in [`SyncMode::Strict`].
pub fn validate_form_sync(form: &FormSchema, schema: &CanonicalSchema, mode: SyncMode) -> SyncReport {
    let form_ids = extract_form_field_ids(&form.components);
    let schema_ids = extract_schema_field_ids(schema);

    let missing_fields: Vec<String> = schema_ids
        .iter()
        .filter(|id| !is_auto_populated(id))
        .filter(|id| !form_ids.contains(*id) && !form_ids.iter().any(|f| f.contains(id.as_str())))
        .cloned()
        .collect();

    let extra_fields: Vec<String> = form_ids
        .iter()
        .filter(|id| !is_auto_populated(id))
        .filter(|id| {
            let base = id.split('.').next().unwrap_or(id.as_str());
            !schema_ids.contains(*id) && !schema_ids.contains(base)
        })
        .cloned()
        .collect();

    let is_valid = missing_fields.is_empty()
        && (mode == SyncMode::Lenient || extra_fields.is_empty());
    tracing::debug!(
        missing = missing_fields.len(),
        extra = extra_fields.len(),
        ?mode,
        "form sync check"
    );

    SyncReport {
        is_valid,
        missing_fields,
        extra_fields,
        form_field_count: form_ids.len(),
        schema_field_count: schema_ids.len(),
    }
}

/// Plain-text rendering of a [`SyncReport`] for terminals.
pub fn render_report(report: &SyncReport, form_name: &str, schema_name: &str) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        "Form Sync Validation Report".to_string(),
        rule.clone(),
        String::new(),
        format!("Form: {form_name}"),
        format!("Schema: {schema_name}"),
        String::new(),
    ];

    if report.missing_fields.is_empty() {
        lines.push("PASS: form collects all required decision inputs".to_string());
        lines.push(String::new());
        lines.push(format!("  Form fields: {}", report.form_field_count));
        lines.push(format!("  Schema fields: {}", report.schema_field_count));
    } else {
        lines.push("FAIL: form is missing required decision inputs".to_string());
        lines.push(String::new());
        lines.push(format!("Missing fields ({}):", report.missing_fields.len()));
        lines.extend(report.missing_fields.iter().map(|f| format!("  - {f}")));
    }

    if !report.extra_fields.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Extra fields not in schema ({}):",
            report.extra_fields.len()
        ));
        lines.extend(report.extra_fields.iter().map(|f| format!("  - {f}")));
        if !report.is_valid && report.missing_fields.is_empty() {
            lines.push(String::new());
            lines.push("FAIL: strict mode rejects extra fields".to_string());
        }
    }

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}
