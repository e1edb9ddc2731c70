/// Type references resolved as primitives. Everything else is a complex type.
pub const PRIMITIVE_TYPES: [&str; 4] = ["date", "number", "string", "boolean"];

/// Supplied by the surrounding application, never asked for in a form.
pub const PRIMARY_PERSON_FIELD: &str = "primaryPersonId";
pub const EVALUATION_DATE_FIELD: &str = "evaluationDate";

/// Always treated as present by the sync validator.
pub const AUTO_POPULATED_FIELDS: [&str; 3] = [PRIMARY_PERSON_FIELD, EVALUATION_DATE_FIELD, "id"];

/// form-js schema version emitted in generated forms.
pub const FORM_SCHEMA_VERSION: u32 = 9;

pub const PERSON_GROUP_ID: &str = "person";
pub const PERSON_GROUP_LABEL: &str = "Personal Information";
pub const SITUATION_GROUP_ID: &str = "situation";
pub const SITUATION_GROUP_LABEL: &str = "Additional Information";

pub fn is_primitive_type(type_ref: &str) -> bool {
    PRIMITIVE_TYPES.contains(&type_ref)
}
