use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSchema {
    pub benefit: String,
    pub version: String,
    pub generated_at: String,
    pub source_document: String,
    pub required_inputs: RequiredInputs,
    #[serde(default)]
    pub metadata: SchemaMetadata,
}

impl CanonicalSchema {
    pub fn field_count(&self) -> usize {
        self.required_inputs.person.len() + self.required_inputs.situation.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequiredInputs {
    #[serde(default)]
    pub person: BTreeMap<String, FieldSpec>,
    #[serde(default)]
    pub situation: BTreeMap<String, FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    pub total_documents: usize,
    pub person_field_count: usize,
    pub situation_field_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRef {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_data: Vec<String>,
}

/// One required input as persisted in the canonical schema.
///
/// Optional attributes are only present when the resolver produced them; use
/// [`FieldSpec::builder`] rather than filling the struct by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    /// Always `false`: requiredness cannot be derived from rule references.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, NestedFieldSpec>>,
}

impl FieldSpec {
    pub fn builder(type_name: impl Into<String>, is_collection: bool) -> FieldSpecBuilder {
        FieldSpecBuilder {
            spec: FieldSpec {
                type_name: type_name.into(),
                required: false,
                is_collection,
                primitive: None,
                item_type: None,
                fields: None,
            },
        }
    }
}

pub struct FieldSpecBuilder {
    spec: FieldSpec,
}

impl FieldSpecBuilder {
    pub fn primitive(mut self, primitive: bool) -> Self {
        self.spec.primitive = Some(primitive);
        self
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.spec.item_type = Some(item_type.into());
        self
    }

    pub fn fields(mut self, fields: BTreeMap<String, NestedFieldSpec>) -> Self {
        self.spec.fields = Some(fields);
        self
    }

    pub fn build(self) -> FieldSpec {
        self.spec
    }
}

/// A sub-field expanded one level below a complex or collection type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedFieldSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_collection: bool,
    #[serde(default)]
    pub primitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Primitive,
    Complex,
    Collection,
}

/// Output of the type resolver for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub type_name: String,
    pub kind: FieldKind,
    pub is_collection: bool,
    /// `None` for collection-typed definitions, which carry no primitive flag.
    pub primitive: Option<bool>,
    pub item_type: Option<String>,
    pub fields: Option<BTreeMap<String, NestedFieldSpec>>,
}

/// form-js style form description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(rename = "type", default = "default_form_type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub components: Vec<FormComponent>,
    #[serde(default)]
    pub schema_version: u32,
}

fn default_form_type() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Textfield,
    Number,
    Checkbox,
    Date,
    Group,
    Dynamiclist,
    /// Anything a hand-edited form may contain (`select`, `text`, ...).
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormComponent {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<Validation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<FormComponent>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    #[serde(default)]
    pub required: bool,
}

impl FormComponent {
    pub fn new(kind: ComponentKind, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
            label: label.into(),
            description: None,
            validate: None,
            components: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.validate = Some(Validation { required });
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn components(mut self, components: Vec<FormComponent>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn children(&self) -> &[FormComponent] {
        self.components.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub extra_fields: Vec<String>,
    pub form_field_count: usize,
    pub schema_field_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Extra form fields are reported but never invalidate the form.
    #[default]
    Lenient,
    /// Extra form fields also invalidate the form.
    Strict,
}

#[derive(Serialize)]
pub struct DeriveSummary {
    pub benefit: String,
    pub output: String,
    pub documents: usize,
    pub person_fields: Vec<String>,
    pub situation_fields: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct WrittenArtifact {
    pub kind: String,
    pub path: String,
}

#[derive(Serialize)]
pub struct WorkflowReport {
    pub benefit: String,
    pub artifacts: Vec<WrittenArtifact>,
    /// Null when form generation was skipped.
    pub sync: Option<SyncReport>,
    pub warnings: Vec<String>,
}
