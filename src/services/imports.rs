use crate::dmn;
use crate::domain::config::ResolverConfig;
use crate::domain::diagnostics::{Diagnostic, Diagnostics};
use crate::domain::document::{DecisionDocument, ResolvedImport};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Every document reachable from a root, parsed once each.
#[derive(Debug, Clone)]
pub struct ImportGraph {
    /// Arena in depth-first pre-order; the root is first.
    documents: Vec<DecisionDocument>,
    index: HashMap<PathBuf, usize>,
    pub imports: Vec<ResolvedImport>,
    pub diagnostics: Diagnostics,
}

impl ImportGraph {
    pub fn root(&self) -> &DecisionDocument {
        &self.documents[0]
    }

    pub fn documents(&self) -> &[DecisionDocument] {
        &self.documents
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.documents.iter().map(|d| d.path.clone()).collect()
    }

    pub fn get(&self, path: &Path) -> Option<&DecisionDocument> {
        self.index.get(path).map(|&i| &self.documents[i])
    }

    /// First document whose file name equals `file_name`.
    pub fn find_by_file_name(&self, file_name: &str) -> Option<&DecisionDocument> {
        self.documents
            .iter()
            .find(|d| d.file_name() == Some(file_name))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub struct ImportResolver<'a> {
    config: &'a ResolverConfig,
}

impl<'a> ImportResolver<'a> {
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    /// Walks the import graph from `root`. The visited set lives for this
    /// call only, so repeated or concurrent resolutions never interfere.
    ///
    /// Unresolvable imports are recorded as diagnostics and skipped; a missing
    /// or malformed document aborts the walk.
    pub fn resolve(&self, root: &Path) -> anyhow::Result<ImportGraph> {
        let root = dmn::canonical_path(root)?;
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut documents = Vec::new();
        let mut index = HashMap::new();
        let mut imports = Vec::new();
        let mut diagnostics = Diagnostics::new();
        let mut stack = vec![root];

        while let Some(path) = stack.pop() {
            if !visited.insert(path.clone()) {
                continue;
            }
            tracing::debug!(path = %path.display(), "reading decision document");
            let doc = dmn::parse_file(&path)?;
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let resources = find_resources_root(
                &base_dir,
                &self.config.resources_marker,
                self.config.max_parent_depth,
            );

            let mut targets = Vec::new();
            for import in &doc.imports {
                let location = import.location.as_deref().filter(|l| !l.is_empty());
                let Some(location) = location else {
                    diagnostics.push(Diagnostic::MissingImportLocation { from: path.clone() });
                    imports.push(ResolvedImport {
                        from: path.clone(),
                        location: None,
                        target: None,
                    });
                    continue;
                };
                let found = self.find_import(&base_dir, location, resources.as_deref());
                let target = match found {
                    Some(p) => Some(dmn::canonical_path(&p)?),
                    None => {
                        diagnostics.push(Diagnostic::UnresolvedImport {
                            location: location.to_string(),
                            from: path.clone(),
                        });
                        None
                    }
                };
                imports.push(ResolvedImport {
                    from: path.clone(),
                    location: Some(location.to_string()),
                    target: target.clone(),
                });
                targets.extend(target);
            }

            // Reversed so the first import is visited first.
            stack.extend(targets.into_iter().rev());
            index.insert(path, documents.len());
            documents.push(doc);
        }

        Ok(ImportGraph {
            documents,
            index,
            imports,
            diagnostics,
        })
    }

    fn find_import(&self, base_dir: &Path, location: &str, resources: Option<&Path>) -> Option<PathBuf> {
        let direct = base_dir.join(location);
        if direct.is_file() {
            return Some(direct);
        }

        let resources = resources?;
        let file_name = Path::new(location).file_name()?;
        self.config
            .fallback_dirs
            .iter()
            .map(|dir| resources.join(dir).join(file_name))
            .find(|candidate| candidate.is_file())
    }
}

/// Walks upward from `start` (inclusive) at most `max_depth` levels looking
/// for a directory named `marker`.
pub fn find_resources_root(start: &Path, marker: &str, max_depth: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(max_depth + 1)
        .find(|dir| dir.file_name().and_then(|n| n.to_str()) == Some(marker))
        .map(Path::to_path_buf)
}
