use serde::Deserialize;
use std::collections::BTreeMap;

/// Pipeline configuration, read from TOML. Every field has a default, so an
/// empty file (or no file) gives the stock DMN layout.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub types: RootTypes,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Name of the directory that anchors the fallback import search.
    pub resources_marker: String,
    /// Subdirectories of the resources root tried for unresolved imports.
    /// `""` means the resources root itself.
    pub fallback_dirs: Vec<String>,
    pub max_parent_depth: usize,
    /// File name of the central type-definition document.
    pub type_document: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resources_marker: "resources".to_string(),
            fallback_dirs: vec![String::new(), "benefits".to_string(), "checks".to_string()],
            max_parent_depth: 10,
            type_document: "BDT.dmn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RootTypes {
    pub person: String,
    pub situation: String,
}

impl Default for RootTypes {
    fn default() -> Self {
        Self {
            person: "tPerson".to_string(),
            situation: "tSituation".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchemaConfig {
    pub version: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
        }
    }
}

/// Extra label/description entries, merged over the generator's built-ins.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub abbreviations: BTreeMap<String, String>,
    pub descriptions: BTreeMap<String, String>,
}
