use crate::domain::constants::is_primitive_type;
use crate::domain::diagnostics::{Diagnostic, Diagnostics};
use crate::domain::document::{DecisionDocument, TypeDefinition};
use crate::domain::models::{FieldKind, NestedFieldSpec, ResolvedField};
use std::collections::{BTreeMap, HashMap};

/// Named type definitions of the central type document.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, TypeDefinition>,
}

impl TypeCatalog {
    /// Indexes `doc`'s item definitions. The first definition of a name wins.
    pub fn from_document(doc: &DecisionDocument) -> Self {
        let mut types = HashMap::new();
        for def in &doc.item_definitions {
            types
                .entry(def.name.clone())
                .or_insert_with(|| def.clone());
        }
        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Resolves root-type fields against a [`TypeCatalog`], expanding complex
/// types exactly one level deep. Sub-fields record their own type name only,
/// which keeps self-referential type graphs finite.
pub struct TypeResolver<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> TypeResolver<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// `None` when the root type or the field is not declared. An undeclared
    /// field is not reported here; an undeclared root type is.
    pub fn resolve(
        &self,
        field: &str,
        root_type: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<ResolvedField> {
        let Some(root) = self.catalog.get(root_type) else {
            diagnostics.push(Diagnostic::MissingParentType {
                root: root_type.to_string(),
            });
            return None;
        };
        let component = root.component(field)?;
        let Some(type_ref) = component.type_ref.as_deref() else {
            diagnostics.push(Diagnostic::MissingTypeRef {
                root: root_type.to_string(),
                field: field.to_string(),
            });
            return None;
        };

        if is_primitive_type(type_ref) {
            return Some(ResolvedField {
                name: field.to_string(),
                type_name: type_ref.to_string(),
                kind: FieldKind::Primitive,
                is_collection: component.is_collection,
                primitive: Some(true),
                item_type: None,
                fields: None,
            });
        }

        Some(self.resolve_complex(field, type_ref, component.is_collection, diagnostics))
    }

    fn resolve_complex(
        &self,
        field: &str,
        type_name: &str,
        is_collection: bool,
        diagnostics: &mut Diagnostics,
    ) -> ResolvedField {
        let complex = |fields| ResolvedField {
            name: field.to_string(),
            type_name: type_name.to_string(),
            kind: if is_collection {
                FieldKind::Collection
            } else {
                FieldKind::Complex
            },
            is_collection,
            primitive: Some(false),
            item_type: is_collection.then(|| type_name.to_string()),
            fields: Some(fields),
        };

        let Some(def) = self.catalog.get(type_name) else {
            diagnostics.push(Diagnostic::UnknownComplexType {
                type_name: type_name.to_string(),
            });
            return complex(BTreeMap::new());
        };

        // A list type such as `tIncomeSourceList`: expand its item type.
        if def.is_collection {
            if let Some(item_type) = def.type_ref.as_deref() {
                return ResolvedField {
                    name: field.to_string(),
                    type_name: type_name.to_string(),
                    kind: FieldKind::Collection,
                    is_collection: true,
                    primitive: None,
                    item_type: Some(item_type.to_string()),
                    fields: Some(self.expand_fields(item_type)),
                };
            }
        }

        complex(self.expand_fields(type_name))
    }

    /// One level of `type_name`'s fields. Components without a type reference
    /// are skipped.
    pub fn expand_fields(&self, type_name: &str) -> BTreeMap<String, NestedFieldSpec> {
        let mut fields = BTreeMap::new();
        let Some(def) = self.catalog.get(type_name) else {
            return fields;
        };
        for component in &def.components {
            let Some(type_ref) = component.type_ref.as_deref() else {
                continue;
            };
            fields
                .entry(component.name.clone())
                .or_insert_with(|| NestedFieldSpec {
                    type_name: type_ref.to_string(),
                    is_collection: component.is_collection,
                    primitive: is_primitive_type(type_ref),
                });
        }
        fields
    }
}
