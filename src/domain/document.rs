use std::path::PathBuf;

/// One parsed decision-model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionDocument {
    /// Canonical absolute path the document was read from.
    pub path: PathBuf,
    /// `definitions/@name`.
    pub model_name: Option<String>,
    pub namespace: Option<String>,
    pub imports: Vec<ImportDeclaration>,
    /// Bodies of every `<text>` element, in document order.
    pub expressions: Vec<String>,
    pub item_definitions: Vec<TypeDefinition>,
    pub input_data: Vec<String>,
}

impl DecisionDocument {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportDeclaration {
    /// `locationURI`. Imports without one cannot be followed.
    pub location: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
}

/// An import as seen by the resolver: where it came from and where it led.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub from: PathBuf,
    pub location: Option<String>,
    pub target: Option<PathBuf>,
}

/// A named `itemDefinition`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDefinition {
    pub name: String,
    /// Direct `typeRef` child: the aliased type, or the item type of a
    /// collection definition.
    pub type_ref: Option<String>,
    pub is_collection: bool,
    /// Every `itemComponent` below the definition, in document order.
    pub components: Vec<TypeComponent>,
}

impl TypeDefinition {
    /// First component declared under `name`.
    pub fn component(&self, name: &str) -> Option<&TypeComponent> {
        self.components.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeComponent {
    pub name: String,
    pub type_ref: Option<String>,
    pub is_collection: bool,
}

/// Root context of a field reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RootContext {
    Person,
    Situation,
}

impl RootContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootContext::Person => "person",
            RootContext::Situation => "situation",
        }
    }
}

/// A `person.*` / `situation.*` path found in an expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldReference {
    pub root: RootContext,
    /// Path below the root, e.g. `incomeSources[].type`.
    pub path: String,
    pub uses_collection_accessor: bool,
    /// Reached through `situation.people[..]` rather than `person.`.
    pub indirect: bool,
}

impl FieldReference {
    /// `incomeSources` for `incomeSources[].type`.
    pub fn first_segment(&self) -> &str {
        first_segment(&self.path)
    }
}

pub fn first_segment(path: &str) -> &str {
    path.split(['.', '[']).next().unwrap_or(path)
}

pub fn is_top_level(path: &str) -> bool {
    !path.contains('.') && !path.contains('[')
}
