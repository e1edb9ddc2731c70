use crate::domain::config::FormConfig;
use crate::domain::constants::{
    EVALUATION_DATE_FIELD, FORM_SCHEMA_VERSION, PERSON_GROUP_ID, PERSON_GROUP_LABEL,
    PRIMARY_PERSON_FIELD, SITUATION_GROUP_ID, SITUATION_GROUP_LABEL,
};
use crate::domain::models::{
    CanonicalSchema, ComponentKind, FieldSpec, FormComponent, FormSchema, NestedFieldSpec,
};
use std::collections::BTreeMap;

const BUILTIN_ABBREVIATIONS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("ssn", "SSN"),
    ("dob", "Date of Birth"),
    ("fbr", "Federal Benefit Rate"),
];

const BUILTIN_DESCRIPTIONS: &[(&str, &str)] = &[
    ("dateOfBirth", "Your date of birth (MM/DD/YYYY)"),
    (
        "isBlindOrDisabled",
        "Check if you are blind or have a qualifying disability",
    ),
    ("citizenshipStatus", "Your citizenship or immigration status"),
    ("residenceState", "The state where you currently reside"),
    (
        "countableResources",
        "Total value of your countable resources (savings, property, etc.)",
    ),
    ("incomeSources", "All sources of income (earned and unearned)"),
    ("monthlyAmount", "Monthly income amount in dollars"),
    ("refugeeAdmissionDate", "Date you were admitted as a refugee"),
    ("asylumGrantDate", "Date you were granted asylum"),
];

/// Turns a canonical schema into a form-js form. Holds the label and
/// description tables; generation itself has no side effects.
#[derive(Debug, Clone)]
pub struct FormGenerator {
    abbreviations: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
}

impl Default for FormGenerator {
    fn default() -> Self {
        Self {
            abbreviations: table(BUILTIN_ABBREVIATIONS),
            descriptions: table(BUILTIN_DESCRIPTIONS),
        }
    }
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl FormGenerator {
    /// Built-in tables with the configured entries layered on top.
    /// Abbreviation keys are matched case-insensitively.
    pub fn with_config(config: &FormConfig) -> Self {
        let mut generator = Self::default();
        for (k, v) in &config.abbreviations {
            generator.abbreviations.insert(k.to_lowercase(), v.clone());
        }
        generator.descriptions.extend(config.descriptions.clone());
        generator
    }

    pub fn generate(&self, schema: &CanonicalSchema) -> FormSchema {
        let mut components = Vec::new();

        let person = self.field_components(&schema.required_inputs.person);
        if !person.is_empty() {
            components.push(
                FormComponent::new(ComponentKind::Group, PERSON_GROUP_ID, PERSON_GROUP_LABEL)
                    .components(person),
            );
        }

        let mut situation = schema.required_inputs.situation.clone();
        situation.remove(PRIMARY_PERSON_FIELD);
        situation.remove(EVALUATION_DATE_FIELD);
        let situation = self.field_components(&situation);
        if !situation.is_empty() {
            components.push(
                FormComponent::new(
                    ComponentKind::Group,
                    SITUATION_GROUP_ID,
                    SITUATION_GROUP_LABEL,
                )
                .components(situation),
            );
        }

        let title = self.format_label(&schema.benefit);
        FormSchema {
            kind: "default".to_string(),
            id: format!("{}Form", schema.benefit),
            description: format!("Eligibility screening form for {title}"),
            title,
            components,
            schema_version: FORM_SCHEMA_VERSION,
        }
    }

    fn field_components(&self, fields: &BTreeMap<String, FieldSpec>) -> Vec<FormComponent> {
        fields
            .iter()
            .map(|(name, spec)| self.field_component(name, spec))
            .collect()
    }

    fn field_component(&self, name: &str, spec: &FieldSpec) -> FormComponent {
        let label = self.format_label(name);
        if spec.is_collection {
            let item = spec.item_type.as_deref().unwrap_or(&spec.type_name);
            let children = spec
                .fields
                .as_ref()
                .map(|f| self.nested_components(f))
                .unwrap_or_default();
            return FormComponent::new(ComponentKind::Dynamiclist, name, label)
                .description(format!("List of {}", self.format_label(item)))
                .components(children);
        }
        if spec.primitive == Some(true) {
            return FormComponent::new(primitive_kind(&spec.type_name), name, label)
                .required(spec.required);
        }
        match &spec.fields {
            Some(fields) if !fields.is_empty() => {
                FormComponent::new(ComponentKind::Group, name, label)
                    .components(self.nested_components(fields))
            }
            _ => FormComponent::new(ComponentKind::Textfield, name, label).required(spec.required),
        }
    }

    fn nested_components(&self, fields: &BTreeMap<String, NestedFieldSpec>) -> Vec<FormComponent> {
        fields
            .iter()
            .map(|(name, nested)| {
                let label = self.format_label(name);
                if nested.is_collection {
                    FormComponent::new(ComponentKind::Dynamiclist, name.as_str(), label)
                        .description(format!("List of {}", self.format_label(&nested.type_name)))
                        .components(Vec::new())
                } else if nested.primitive {
                    FormComponent::new(primitive_kind(&nested.type_name), name.as_str(), label)
                        .required(false)
                } else {
                    FormComponent::new(ComponentKind::Textfield, name.as_str(), label)
                        .required(false)
                }
            })
            .collect()
    }

    /// Sets the description of every component, at any depth, whose id has
    /// an entry in the description table.
    pub fn add_descriptions(&self, form: &mut FormSchema) {
        let mut stack: Vec<&mut FormComponent> = form.components.iter_mut().collect();
        while let Some(component) = stack.pop() {
            if let Some(text) = component
                .id
                .as_deref()
                .and_then(|id| self.descriptions.get(id))
            {
                component.description = Some(text.clone());
            }
            if let Some(children) = component.components.as_mut() {
                stack.extend(children.iter_mut());
            }
        }
    }

    /// Human-readable label: the abbreviation table first, otherwise
    /// camelCase split into words.
    pub fn format_label(&self, name: &str) -> String {
        match self.abbreviations.get(&name.to_lowercase()) {
            Some(label) => label.clone(),
            None => humanize(name),
        }
    }
}

fn primitive_kind(type_name: &str) -> ComponentKind {
    match type_name {
        "date" => ComponentKind::Date,
        "boolean" => ComponentKind::Checkbox,
        "number" => ComponentKind::Number,
        _ => ComponentKind::Textfield,
    }
}

/// `dateOfBirth` -> `Date Of Birth`, `SSIEligibility` -> `S S I Eligibility`.
pub(crate) fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    let mut chars = out.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{RequiredInputs, SchemaMetadata};

    fn nested(type_name: &str, primitive: bool) -> NestedFieldSpec {
        NestedFieldSpec {
            type_name: type_name.into(),
            is_collection: false,
            primitive,
        }
    }

    fn schema() -> CanonicalSchema {
        let mut person = BTreeMap::new();
        person.insert(
            "dateOfBirth".to_string(),
            FieldSpec::builder("date", false).primitive(true).build(),
        );
        person.insert(
            "isBlindOrDisabled".to_string(),
            FieldSpec::builder("boolean", false).primitive(true).build(),
        );
        person.insert(
            "incomeSources".to_string(),
            FieldSpec::builder("tIncomeSource", true)
                .primitive(false)
                .item_type("tIncomeSource")
                .fields(BTreeMap::from([
                    ("type".to_string(), nested("string", true)),
                    ("monthlyAmount".to_string(), nested("number", true)),
                ]))
                .build(),
        );
        person.insert(
            "address".to_string(),
            FieldSpec::builder("tAddress", false)
                .primitive(false)
                .fields(BTreeMap::from([("state".to_string(), nested("string", true))]))
                .build(),
        );
        person.insert(
            "pet".to_string(),
            FieldSpec::builder("tPet", false)
                .primitive(false)
                .fields(BTreeMap::new())
                .build(),
        );

        let mut situation = BTreeMap::new();
        for name in ["primaryPersonId", "evaluationDate"] {
            situation.insert(
                name.to_string(),
                FieldSpec::builder("string", false).primitive(true).build(),
            );
        }

        CanonicalSchema {
            benefit: "SsiEligibility".into(),
            version: "1.0.0".into(),
            generated_at: "2025-01-01T00:00:00.000Z".into(),
            source_document: "ssi.dmn".into(),
            required_inputs: RequiredInputs { person, situation },
            metadata: SchemaMetadata::default(),
        }
    }

    fn by_id<'a>(components: &'a [FormComponent], id: &str) -> &'a FormComponent {
        components
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .unwrap()
    }

    #[test]
    fn envelope_and_groups() {
        let form = FormGenerator::default().generate(&schema());
        assert_eq!(form.kind, "default");
        assert_eq!(form.id, "SsiEligibilityForm");
        assert_eq!(form.title, "Ssi Eligibility");
        assert_eq!(form.description, "Eligibility screening form for Ssi Eligibility");
        assert_eq!(form.schema_version, 9);
        // Situation only had auto-populated fields, so no group for it.
        assert_eq!(form.components.len(), 1);
        assert_eq!(form.components[0].label, "Personal Information");
    }

    #[test]
    fn maps_field_kinds_to_components() {
        let form = FormGenerator::default().generate(&schema());
        let person = form.components[0].children();

        assert_eq!(by_id(person, "dateOfBirth").kind, ComponentKind::Date);
        let blind = by_id(person, "isBlindOrDisabled");
        assert_eq!(blind.kind, ComponentKind::Checkbox);
        assert_eq!(blind.validate.as_ref().map(|v| v.required), Some(false));

        let income = by_id(person, "incomeSources");
        assert_eq!(income.kind, ComponentKind::Dynamiclist);
        assert_eq!(income.description.as_deref(), Some("List of T Income Source"));
        assert_eq!(by_id(income.children(), "monthlyAmount").kind, ComponentKind::Number);
        assert_eq!(by_id(income.children(), "type").kind, ComponentKind::Textfield);

        let address = by_id(person, "address");
        assert_eq!(address.kind, ComponentKind::Group);
        assert_eq!(address.children().len(), 1);

        assert_eq!(by_id(person, "pet").kind, ComponentKind::Textfield);
    }

    #[test]
    fn generation_is_deterministic() {
        let generator = FormGenerator::default();
        let a = serde_json::to_string(&generator.generate(&schema())).unwrap();
        let b = serde_json::to_string(&generator.generate(&schema())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn descriptions_apply_at_any_depth() {
        let generator = FormGenerator::default();
        let mut form = generator.generate(&schema());
        generator.add_descriptions(&mut form);
        let person = form.components[0].children();
        assert_eq!(
            by_id(person, "dateOfBirth").description.as_deref(),
            Some("Your date of birth (MM/DD/YYYY)")
        );
        let income = by_id(person, "incomeSources");
        assert_eq!(
            by_id(income.children(), "monthlyAmount").description.as_deref(),
            Some("Monthly income amount in dollars")
        );
        assert!(by_id(person, "address").description.is_none());
    }

    #[test]
    fn labels() {
        let generator = FormGenerator::default();
        assert_eq!(generator.format_label("dateOfBirth"), "Date Of Birth");
        assert_eq!(generator.format_label("SSN"), "SSN");
        assert_eq!(generator.format_label("dob"), "Date of Birth");
        assert_eq!(generator.format_label("householdSize"), "Household Size");
        assert_eq!(generator.format_label(""), "");
    }

    #[test]
    fn configured_tables_extend_builtins() {
        let config = FormConfig {
            abbreviations: BTreeMap::from([("SNAP".to_string(), "SNAP".to_string())]),
            descriptions: BTreeMap::from([(
                "address".to_string(),
                "Where you live".to_string(),
            )]),
        };
        let generator = FormGenerator::with_config(&config);
        assert_eq!(generator.format_label("snap"), "SNAP");
        assert_eq!(generator.format_label("id"), "ID");

        let mut form = generator.generate(&schema());
        generator.add_descriptions(&mut form);
        assert_eq!(
            by_id(form.components[0].children(), "address")
                .description
                .as_deref(),
            Some("Where you live")
        );
    }
}
