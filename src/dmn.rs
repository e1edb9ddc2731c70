use crate::domain::document::{DecisionDocument, ImportDeclaration, TypeComponent, TypeDefinition};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum DmnError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("malformed DMN in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} not found in files imported from {}; cannot resolve types", root.display())]
    TypeDocumentNotFound { name: String, root: PathBuf },
}

impl DmnError {
    /// Stable code used in `--json` error output.
    pub fn code(&self) -> &'static str {
        match self {
            DmnError::NotFound { .. } => "NOT_FOUND",
            DmnError::Parse { .. } => "PARSE_ERROR",
            DmnError::Io { .. } => "IO_ERROR",
            DmnError::TypeDocumentNotFound { .. } => "TYPE_DOCUMENT_MISSING",
        }
    }
}

/// Canonical absolute path of an existing file.
pub fn canonical_path(path: &Path) -> anyhow::Result<PathBuf> {
    if !path.exists() {
        return Err(DmnError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    path.canonicalize().map_err(|source| {
        DmnError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

pub fn parse_file(path: &Path) -> anyhow::Result<DecisionDocument> {
    let path = canonical_path(path)?;
    let xml = std::fs::read_to_string(&path).map_err(|source| DmnError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(parse_str(&path, &xml)?)
}

/// Parses DMN markup. `path` is recorded on the document and in errors only.
pub fn parse_str(path: &Path, xml: &str) -> Result<DecisionDocument, DmnError> {
    let mut parser = DocumentParser::new(path);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        let event = reader.read_event().map_err(|e| DmnError::Parse {
            path: path.to_path_buf(),
            message: format!("{} (at byte {})", e, reader.error_position()),
        })?;
        match event {
            Event::Start(e) => parser.open(&e, false)?,
            Event::Empty(e) => parser.open(&e, true)?,
            Event::End(_) => parser.close(),
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| parser.error(e))?;
                parser.text(&text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                parser.text(&String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

/// Element names the parser cares about, by local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Definitions,
    Import,
    ItemDefinition,
    ItemComponent,
    TypeRef,
    Text,
    InputData,
    Other,
}

impl Element {
    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"definitions" => Element::Definitions,
            b"import" => Element::Import,
            b"itemDefinition" => Element::ItemDefinition,
            b"itemComponent" => Element::ItemComponent,
            b"typeRef" => Element::TypeRef,
            b"text" => Element::Text,
            b"inputData" => Element::InputData,
            _ => Element::Other,
        }
    }
}

struct DocumentParser {
    path: PathBuf,
    stack: Vec<Element>,
    seen_definitions: bool,
    model_name: Option<String>,
    namespace: Option<String>,
    imports: Vec<ImportDeclaration>,
    expressions: Vec<String>,
    input_data: Vec<String>,
    item_definitions: Vec<TypeDefinition>,
    /// Definition being read, with the indices of its open components.
    current: Option<(TypeDefinition, Vec<usize>)>,
    buffer: String,
}

impl DocumentParser {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            stack: Vec::new(),
            seen_definitions: false,
            model_name: None,
            namespace: None,
            imports: Vec::new(),
            expressions: Vec::new(),
            input_data: Vec::new(),
            item_definitions: Vec::new(),
            current: None,
            buffer: String::new(),
        }
    }

    fn error(&self, e: impl std::fmt::Display) -> DmnError {
        DmnError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn attr(&self, e: &BytesStart<'_>, name: &str) -> Result<Option<String>, DmnError> {
        match e.try_get_attribute(name).map_err(|err| self.error(err))? {
            Some(a) => Ok(Some(
                a.unescape_value().map_err(|err| self.error(err))?.into_owned(),
            )),
            None => Ok(None),
        }
    }

    fn flag(&self, e: &BytesStart<'_>, name: &str) -> Result<bool, DmnError> {
        Ok(self.attr(e, name)?.as_deref() == Some("true"))
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<(), DmnError> {
        let element = Element::from_local_name(e.local_name().as_ref());
        match element {
            Element::Definitions if !self.seen_definitions => {
                self.seen_definitions = true;
                self.model_name = self.attr(e, "name")?;
                self.namespace = self.attr(e, "namespace")?;
            }
            Element::Import => {
                let import = ImportDeclaration {
                    location: self.attr(e, "locationURI")?,
                    name: self.attr(e, "name")?,
                    namespace: self.attr(e, "namespace")?,
                };
                self.imports.push(import);
            }
            Element::InputData => {
                let name = self.attr(e, "name")?;
                self.input_data.extend(name);
            }
            Element::ItemDefinition if self.current.is_none() => {
                let def = TypeDefinition {
                    name: self.attr(e, "name")?.unwrap_or_default(),
                    type_ref: None,
                    is_collection: self.flag(e, "isCollection")?,
                    components: Vec::new(),
                };
                self.current = Some((def, Vec::new()));
            }
            Element::ItemComponent => {
                let component = TypeComponent {
                    name: self.attr(e, "name")?.unwrap_or_default(),
                    type_ref: None,
                    is_collection: self.flag(e, "isCollection")?,
                };
                if let Some((def, open)) = self.current.as_mut() {
                    def.components.push(component);
                    open.push(def.components.len() - 1);
                }
            }
            Element::TypeRef | Element::Text => self.buffer.clear(),
            _ => {}
        }

        if empty {
            // A self-closing element opens and closes in one event.
            self.stack.push(element);
            self.close();
        } else {
            self.stack.push(element);
        }
        Ok(())
    }

    fn close(&mut self) {
        let Some(element) = self.stack.pop() else {
            return;
        };
        match element {
            Element::Text => {
                let text = std::mem::take(&mut self.buffer);
                if !text.trim().is_empty() {
                    self.expressions.push(text);
                }
            }
            Element::TypeRef => {
                let text = std::mem::take(&mut self.buffer).trim().to_string();
                // An empty element declares no type.
                let type_ref = Some(text).filter(|t| !t.is_empty());
                if let Some((def, open)) = self.current.as_mut() {
                    match open.last() {
                        Some(&idx) => def.components[idx].type_ref = type_ref,
                        None => def.type_ref = type_ref,
                    }
                }
            }
            Element::ItemComponent => {
                if let Some((_, open)) = self.current.as_mut() {
                    open.pop();
                }
            }
            Element::ItemDefinition => {
                // Only the outermost definition is tracked.
                if !self.stack.contains(&Element::ItemDefinition) {
                    if let Some((def, _)) = self.current.take() {
                        self.item_definitions.push(def);
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if matches!(self.stack.last(), Some(Element::Text | Element::TypeRef)) {
            self.buffer.push_str(text);
        }
    }

    fn finish(self) -> Result<DecisionDocument, DmnError> {
        if !self.stack.is_empty() {
            return Err(self.error("unexpected end of document (unclosed elements)"));
        }
        if !self.seen_definitions {
            return Err(self.error("missing definitions element"));
        }
        Ok(DecisionDocument {
            path: self.path,
            model_name: self.model_name,
            namespace: self.namespace,
            imports: self.imports,
            expressions: self.expressions,
            item_definitions: self.item_definitions,
            input_data: self.input_data,
        })
    }
}
