//! Base documents: the set of user-supplied input files.
//!
//! A [`BaseDocuments`] maps each original filename to its raw bytes. It is
//! populated once — before assembly starts — and is read-only for the
//! duration of a run. Directives reference documents by the name they were
//! uploaded under, so a CLI-loaded file is keyed by its file name, not its
//! full path.

use crate::error::ReportError;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Mapping from uploaded filename to opaque document bytes.
#[derive(Debug, Default, Clone)]
pub struct BaseDocuments {
    docs: HashMap<String, Vec<u8>>,
}

impl BaseDocuments {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load each path's contents, keyed by its file name.
    ///
    /// Missing or unreadable files fail the whole load: a typo'd `--doc`
    /// argument should surface immediately, not as a soft failure later.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ReportError> {
        let mut docs = Self::new();
        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                return Err(ReportError::DocumentNotFound {
                    path: path.to_path_buf(),
                });
            }
            let bytes = std::fs::read(path).map_err(|e| ReportError::DocumentRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            docs.insert(name, bytes);
        }
        Ok(docs)
    }

    /// Register a document under the given name, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        debug!("Registered base document '{}' ({} bytes)", name, bytes.len());
        self.docs.insert(name, bytes);
    }

    /// Look up a document's bytes by its uploaded name.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.docs.get(name).map(|b| b.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.docs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
