//! Index store: the persisted snapshot of catalog + file index
//!
//! The snapshot is a single JSON document inside the working root:
//!
//! ```text
//! {"v":[1,0,0],"e":{"/doc.txt":{"t":[1,2]}},"t":{"1":"red","2":"blue"},"l":2}
//! ```
//!
//! `v` is the schema version, `e` maps index keys to entries (`h` hash,
//! `t` tag ids), `t` maps tag ids to names and `l` is the last allocated id.
//! The long names `version`, `entries`, `hash`, `tags` and `lastTag` are
//! accepted on read. Empty fields are omitted on write.
//!
//! There is no cross-process locking. Two invocations that both mutate the
//! same snapshot race, and the later save silently replaces the earlier one.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{validate_tag_name, TagCatalog, TagId};
use crate::error::{Result, TaggerError};
use crate::file_index::{DuplicatePolicy, FileEntry, FileIndex};
use crate::fs_utils;

/// Schema version written by this build and the only one it will load.
pub const SCHEMA_VERSION: [u32; 3] = [1, 0, 0];

/// Snapshot file name inside the working root.
pub const DEFAULT_INDEX_FILE: &str = ".tagger";

/// Complete in-memory state of the tag index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSnapshot {
    pub version: [u32; 3],
    pub catalog: TagCatalog,
    pub files: FileIndex,
}

impl Default for IndexSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl IndexSnapshot {
    /// A fresh snapshot at the current schema version.
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            catalog: TagCatalog::new(),
            files: FileIndex::new(),
        }
    }

    /// Tag `key` with `names`, creating unknown tags first.
    ///
    /// Every name is validated before anything changes, so a bad name leaves
    /// the snapshot untouched. Returns the ids in the order of `names`.
    pub fn add_tags<S: AsRef<str>>(
        &mut self,
        key: &str,
        names: &[S],
        policy: DuplicatePolicy,
    ) -> Result<Vec<TagId>> {
        for name in names {
            validate_tag_name(name.as_ref())?;
        }

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(self.catalog.lookup_or_create(name.as_ref())?);
        }
        self.files.add_tags(key, &ids, policy);
        Ok(ids)
    }
}

/// On-disk shape of [`IndexSnapshot`].
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(rename = "v", alias = "version", default = "current_version")]
    version: [u32; 3],

    #[serde(rename = "e", alias = "entries", default, skip_serializing_if = "BTreeMap::is_empty")]
    entries: BTreeMap<String, FileEntry>,

    #[serde(rename = "t", alias = "tags", default, skip_serializing_if = "BTreeMap::is_empty")]
    tags: BTreeMap<TagId, String>,

    #[serde(rename = "l", alias = "lastTag", default, skip_serializing_if = "is_zero")]
    last_tag: TagId,
}

fn current_version() -> [u32; 3] {
    SCHEMA_VERSION
}

fn is_zero(value: &TagId) -> bool {
    *value == 0
}

impl From<&IndexSnapshot> for SnapshotFile {
    fn from(snapshot: &IndexSnapshot) -> Self {
        Self {
            version: snapshot.version,
            entries: snapshot.files.entries().clone(),
            tags: snapshot.catalog.names_by_id().clone(),
            last_tag: snapshot.catalog.last_allocated(),
        }
    }
}

/// Load the snapshot at `location`.
///
/// A missing file yields an empty snapshot. An unparseable file is
/// [`TaggerError::CorruptDatabase`]; a parseable file at another schema
/// version is [`TaggerError::UnsupportedVersion`].
pub fn load(location: &Path) -> Result<IndexSnapshot> {
    let data = match fs::read(location) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no snapshot at {}, starting empty", location.display());
            return Ok(IndexSnapshot::empty());
        }
        Err(e) => {
            return Err(TaggerError::PersistenceFailure {
                path: location.to_path_buf(),
                source: e,
            })
        }
    };

    let file: SnapshotFile =
        serde_json::from_slice(&data).map_err(|e| TaggerError::CorruptDatabase {
            path: location.to_path_buf(),
            message: e.to_string(),
        })?;

    if file.version != SCHEMA_VERSION {
        return Err(TaggerError::UnsupportedVersion {
            found: file.version,
            expected: SCHEMA_VERSION,
        });
    }

    validate(&file).map_err(|message| TaggerError::CorruptDatabase {
        path: location.to_path_buf(),
        message,
    })?;

    tracing::debug!(
        "loaded {} entries and {} tags from {}",
        file.entries.len(),
        file.tags.len(),
        location.display()
    );

    Ok(IndexSnapshot {
        version: file.version,
        catalog: TagCatalog::from_persisted(file.tags, file.last_tag),
        files: FileIndex::from_entries(file.entries),
    })
}

/// Write `snapshot` to `location`, replacing the previous contents atomically.
pub fn save(location: &Path, snapshot: &IndexSnapshot) -> Result<()> {
    let file = SnapshotFile::from(snapshot);
    let data = serde_json::to_vec(&file).map_err(|e| TaggerError::PersistenceFailure {
        path: location.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;

    fs_utils::write_atomic(location, &data).map_err(|e| TaggerError::PersistenceFailure {
        path: location.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        "saved {} entries and {} tags to {}",
        file.entries.len(),
        file.tags.len(),
        location.display()
    );
    Ok(())
}

fn validate(file: &SnapshotFile) -> std::result::Result<(), String> {
    for (&id, name) in &file.tags {
        if id == 0 {
            return Err("tag id 0 is not a valid identifier".to_string());
        }
        if name.is_empty() {
            return Err(format!("tag id {} has an empty name", id));
        }
    }
    Ok(())
}
