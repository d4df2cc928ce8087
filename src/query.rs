//! Read-only queries over a loaded snapshot

use std::path::Path;

use crate::catalog::TagLabel;
use crate::error::Result;
use crate::sandbox::{Existence, PathSandbox};
use crate::store::IndexSnapshot;

/// Answers "which files have tag T" and "which tags does file F have".
pub struct QueryEngine<'a> {
    snapshot: &'a IndexSnapshot,
    sandbox: &'a PathSandbox,
}

/// Tags recorded for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTags {
    /// Index key of the file.
    pub key: String,
    /// One label per stored id, in stored order. `None` when never tagged.
    pub tags: Option<Vec<TagLabel>>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(snapshot: &'a IndexSnapshot, sandbox: &'a PathSandbox) -> Self {
        Self { snapshot, sandbox }
    }

    /// Index keys tagged with `name`, lexicographically ordered.
    ///
    /// An unknown tag name is an empty result, not an error.
    pub fn files_for_tag(&self, name: &str) -> Vec<String> {
        match self.snapshot.catalog.id_of(name) {
            Some(id) => self
                .snapshot
                .files
                .files_with_tag(id)
                .into_iter()
                .map(str::to_string)
                .collect(),
            None => {
                tracing::debug!("tag '{}' is not in the catalog", name);
                Vec::new()
            }
        }
    }

    /// Tags for the file at `candidate`, which must confine to the root.
    ///
    /// The file itself need not exist any more.
    pub fn tags_for_path(&self, candidate: &Path) -> Result<FileTags> {
        let key = self.sandbox.confine(candidate, Existence::Optional)?;
        Ok(self.tags_for_key(&key))
    }

    /// Tags for an already-confined index key.
    pub fn tags_for_key(&self, key: &str) -> FileTags {
        let tags = self.snapshot.files.entry_of(key).map(|entry| {
            entry
                .tags
                .iter()
                .map(|&id| self.snapshot.catalog.label_of(id))
                .collect()
        });
        FileTags {
            key: key.to_string(),
            tags,
        }
    }

    /// Every known tag name, ordered by id.
    pub fn tag_names(&self) -> Vec<&'a str> {
        self.snapshot.catalog.iter().map(|(_, name)| name).collect()
    }
}
