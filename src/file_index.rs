//! File index: sandboxed path key -> assigned tag ids

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::TagId;

/// What to do when a file already carries a tag being added again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append every id, even ones already present. The sequence grows each
    /// time the same tag is applied.
    #[default]
    Allow,
    /// Skip ids already present in the entry.
    Skip,
}

/// Tags recorded for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Reserved content hash; always empty today.
    #[serde(rename = "h", alias = "hash", default, skip_serializing_if = "String::is_empty")]
    pub hash: String,

    /// Tag ids in the order they were applied.
    #[serde(rename = "t", alias = "tags", default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagId>,
}

impl FileEntry {
    pub fn has_tag(&self, id: TagId) -> bool {
        self.tags.contains(&id)
    }
}

/// All tagged files, keyed by their root-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    entries: BTreeMap<String, FileEntry>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, FileEntry>) -> Self {
        Self { entries }
    }

    /// Record `tag_ids` for `key`, creating the entry if needed.
    ///
    /// Ids are appended in the order given. Whether ids already present are
    /// appended again depends on `policy`.
    pub fn add_tags(&mut self, key: &str, tag_ids: &[TagId], policy: DuplicatePolicy) {
        let entry = self.entries.entry(key.to_string()).or_default();
        for &id in tag_ids {
            if policy == DuplicatePolicy::Skip && entry.has_tag(id) {
                tracing::debug!("{} already has tag id {}", key, id);
                continue;
            }
            entry.tags.push(id);
        }
    }

    /// Entry for `key`, or `None` if the file was never tagged.
    pub fn entry_of(&self, key: &str) -> Option<&FileEntry> {
        self.entries.get(key)
    }

    /// Keys whose tag sequence contains `id`, in lexicographic order.
    pub fn files_with_tag(&self, id: TagId) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.has_tag(id))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn entries(&self) -> &BTreeMap<String, FileEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
