//! Markdown reference page for a benefit's required inputs.
//!
//! The page is a pure function of the canonical schema, footer date
//! included, so regenerating from an unchanged schema gives identical bytes.

use crate::domain::models::{CanonicalSchema, FieldSpec, NestedFieldSpec};
use crate::services::form::humanize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

const TABLE_HEADER: &str = "| Field ID | Display Name | Type | Required | Description |";
const TABLE_RULE: &str = "|----------|--------------|------|----------|-------------|";
const EXAMPLE_PERSON_ID: &str = "person-1";

pub fn generate_documentation(schema: &CanonicalSchema) -> anyhow::Result<String> {
    let inputs = &schema.required_inputs;
    let benefit = humanize(&schema.benefit);
    let models = &schema.metadata.models;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {benefit} - Required Inputs"));
    lines.push(String::new());
    lines.push("This document describes all required inputs for the eligibility screener.".into());
    lines.push(String::new());
    lines.push("> **Auto-generated** from the decision models - do not edit manually.".into());
    lines.push("> Run `benefit-inputs derive` to regenerate.".into());
    lines.push(String::new());

    lines.push("## Overview".into());
    lines.push(String::new());
    lines.push(format!("- **Benefit**: {benefit}"));
    lines.push(format!("- **Total required inputs**: {}", schema.field_count()));
    lines.push(format!("- **Person fields**: {}", inputs.person.len()));
    lines.push(format!("- **Situation fields**: {}", inputs.situation.len()));
    if !models.is_empty() {
        lines.push(format!("- **Decision models**: {}", models.len()));
    }
    lines.push(String::new());

    let sections = [
        (
            "Person Fields",
            "Information about the individual being evaluated for eligibility.",
            &inputs.person,
        ),
        (
            "Situation Fields",
            "Information about the household or circumstances.",
            &inputs.situation,
        ),
    ];
    for (title, blurb, fields) in sections {
        if fields.is_empty() {
            continue;
        }
        lines.push(format!("## {title}"));
        lines.push(String::new());
        lines.push(blurb.into());
        lines.push(String::new());
        lines.push(TABLE_HEADER.into());
        lines.push(TABLE_RULE.into());
        lines.extend(field_rows(fields));
        lines.push(String::new());
    }

    if !models.is_empty() {
        lines.push("## Decision Models".into());
        lines.push(String::new());
        lines.push("The following decision models are used in this eligibility determination:".into());
        lines.push(String::new());
        for model in models {
            lines.push(format!("- **{}** ({})", model.name, model.path));
            if !model.input_data.is_empty() {
                lines.push(format!("  - Inputs: {}", model.input_data.join(", ")));
            }
        }
        lines.push(String::new());
    }

    lines.push("## Example Request".into());
    lines.push(String::new());
    lines.push("```json".into());
    lines.push(serde_json::to_string_pretty(&example_request(schema))?);
    lines.push("```".into());
    lines.push(String::new());

    lines.push("---".into());
    lines.push(String::new());
    let date = schema.generated_at.split('T').next().unwrap_or_default();
    lines.push(format!("*Generated: {date}*"));
    lines.push(String::new());

    Ok(lines.join("\n"))
}

fn field_rows(fields: &BTreeMap<String, FieldSpec>) -> Vec<String> {
    let mut rows = Vec::new();
    for (name, spec) in fields {
        rows.push(row(name, name, &type_display(spec), spec.required));
        // Collections show their shape in the example instead.
        if spec.is_collection {
            continue;
        }
        for (sub, nested) in spec.fields.iter().flatten() {
            let display = if nested.is_collection {
                format!("List of {}", nested.type_name)
            } else {
                nested.type_name.clone()
            };
            rows.push(row(&format!("{name}.{sub}"), sub, &display, false));
        }
    }
    rows
}

fn row(id: &str, name: &str, type_display: &str, required: bool) -> String {
    let required = if required { "Yes" } else { "No" };
    format!("| {id} | {} | {type_display} | {required} |  |", humanize(name))
}

fn type_display(spec: &FieldSpec) -> String {
    if spec.is_collection {
        let base = spec.item_type.as_deref().unwrap_or(&spec.type_name);
        return format!("List of {base}");
    }
    if spec.type_name.is_empty() {
        "object".to_string()
    } else {
        spec.type_name.clone()
    }
}

fn example_request(schema: &CanonicalSchema) -> Value {
    let inputs = &schema.required_inputs;
    let mut situation = Map::new();

    if !inputs.person.is_empty() {
        let mut person = Map::new();
        person.insert("id".into(), json!(EXAMPLE_PERSON_ID));
        for (name, spec) in &inputs.person {
            person.insert(name.clone(), generate_example(name, spec));
        }
        situation.insert("people".into(), Value::Array(vec![Value::Object(person)]));
        situation.insert("primaryPersonId".into(), json!(EXAMPLE_PERSON_ID));
    }
    for (name, spec) in &inputs.situation {
        situation.insert(name.clone(), generate_example(name, spec));
    }

    json!({ "situation": situation })
}

/// Plausible sample value for a field, driven by its type and, for numbers
/// and strings, by hints in its name.
pub fn generate_example(name: &str, spec: &FieldSpec) -> Value {
    if spec.is_collection {
        return match &spec.fields {
            Some(fields) => Value::Array(vec![nested_object(fields)]),
            None => Value::Array(Vec::new()),
        };
    }
    if spec.primitive == Some(true) {
        if let Some(v) = primitive_example(name, &spec.type_name) {
            return v;
        }
    }
    match &spec.fields {
        Some(fields) => nested_object(fields),
        None => Value::Null,
    }
}

fn nested_object(fields: &BTreeMap<String, NestedFieldSpec>) -> Value {
    let mut obj = Map::new();
    for (name, nested) in fields {
        let value = if nested.is_collection {
            Value::Array(Vec::new())
        } else if nested.primitive {
            primitive_example(name, &nested.type_name).unwrap_or(Value::Null)
        } else {
            Value::Null
        };
        obj.insert(name.clone(), value);
    }
    Value::Object(obj)
}

fn primitive_example(name: &str, type_name: &str) -> Option<Value> {
    let lower = name.to_lowercase();
    let value = match type_name {
        "date" => json!("2024-01-15"),
        "boolean" => json!(false),
        "number" if lower.contains("amount") || lower.contains("income") => json!(1500),
        "number" => json!(0),
        "string" if lower.contains("id") => json!("person-123"),
        "string" if lower.contains("state") => json!("PA"),
        "string" if lower.contains("status") => json!("US_CITIZEN"),
        "string" => json!(""),
        _ => return None,
    };
    Some(value)
}

/// Kebab-case folder name for a benefit: `SsiEligibility` -> `ssi-eligibility`.
pub fn benefit_slug(benefit: &str) -> String {
    let mut slug = String::with_capacity(benefit.len() + 4);
    for c in benefit.chars() {
        if c.is_ascii_uppercase() {
            slug.push('-');
        }
        slug.push(c.to_ascii_lowercase());
    }
    match slug.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ModelRef, RequiredInputs, SchemaMetadata};

    fn schema() -> CanonicalSchema {
        let person = BTreeMap::from([
            (
                "dateOfBirth".to_string(),
                FieldSpec::builder("date", false).primitive(true).build(),
            ),
            (
                "incomeSources".to_string(),
                FieldSpec::builder("tIncomeSource", true)
                    .primitive(false)
                    .item_type("tIncomeSource")
                    .fields(BTreeMap::from([(
                        "monthlyAmount".to_string(),
                        NestedFieldSpec {
                            type_name: "number".into(),
                            is_collection: false,
                            primitive: true,
                        },
                    )]))
                    .build(),
            ),
            (
                "address".to_string(),
                FieldSpec::builder("tAddress", false)
                    .primitive(false)
                    .fields(BTreeMap::from([(
                        "state".to_string(),
                        NestedFieldSpec {
                            type_name: "string".into(),
                            is_collection: false,
                            primitive: true,
                        },
                    )]))
                    .build(),
            ),
        ]);
        let situation = BTreeMap::from([(
            "residenceState".to_string(),
            FieldSpec::builder("string", false).primitive(true).build(),
        )]);
        CanonicalSchema {
            benefit: "SsiEligibility".into(),
            version: "1.0.0".into(),
            generated_at: "2025-03-04T05:06:07.000Z".into(),
            source_document: "benefits/ssi.dmn".into(),
            required_inputs: RequiredInputs { person, situation },
            metadata: SchemaMetadata {
                total_documents: 2,
                person_field_count: 3,
                situation_field_count: 1,
                models: vec![ModelRef {
                    name: "SsiEligibility".into(),
                    path: "benefits/ssi.dmn".into(),
                    input_data: vec!["situation".into()],
                }],
            },
        }
    }

    #[test]
    fn page_has_overview_tables_and_footer() {
        let md = generate_documentation(&schema()).unwrap();
        assert!(md.starts_with("# Ssi Eligibility - Required Inputs\n"));
        assert!(md.contains("- **Total required inputs**: 4"));
        assert!(md.contains("| dateOfBirth | Date Of Birth | date | No |  |"));
        assert!(md.contains("| incomeSources | Income Sources | List of tIncomeSource | No |  |"));
        assert!(md.contains("| address.state | State | string | No |  |"));
        assert!(!md.contains("| incomeSources.monthlyAmount |"));
        assert!(md.contains("- **SsiEligibility** (benefits/ssi.dmn)"));
        assert!(md.contains("  - Inputs: situation"));
        assert!(md.contains("*Generated: 2025-03-04*"));
    }

    #[test]
    fn page_is_stable_for_the_same_schema() {
        let s = schema();
        assert_eq!(
            generate_documentation(&s).unwrap(),
            generate_documentation(&s).unwrap()
        );
    }

    #[test]
    fn example_request_nests_person_under_people() {
        let example = example_request(&schema());
        let person = &example["situation"]["people"][0];
        assert_eq!(person["id"], "person-1");
        assert_eq!(person["dateOfBirth"], "2024-01-15");
        assert_eq!(person["incomeSources"][0]["monthlyAmount"], 1500);
        assert_eq!(person["address"]["state"], "PA");
        assert_eq!(example["situation"]["primaryPersonId"], "person-1");
        assert_eq!(example["situation"]["residenceState"], "PA");
    }

    #[test]
    fn example_values_follow_name_hints() {
        let string = FieldSpec::builder("string", false).primitive(true).build();
        assert_eq!(generate_example("citizenshipStatus", &string), "US_CITIZEN");
        assert_eq!(generate_example("nickname", &string), "");
        let number = FieldSpec::builder("number", false).primitive(true).build();
        assert_eq!(generate_example("householdSize", &number), 0);
        let list = FieldSpec::builder("tThing", true).build();
        assert_eq!(generate_example("things", &list), json!([]));
        let opaque = FieldSpec::builder("tOpaque", false).primitive(false).build();
        assert_eq!(generate_example("blob", &opaque), Value::Null);
    }

    #[test]
    fn slugs() {
        assert_eq!(benefit_slug("SsiEligibility"), "ssi-eligibility");
        assert_eq!(benefit_slug("paSnap"), "pa-snap");
        assert_eq!(benefit_slug("medicaid"), "medicaid");
    }
}
