//! Tag catalog: the bidirectional tag name <-> identifier mapping
//!
//! Identifiers are small positive integers handed out in strictly increasing
//! order and never reused. Only the id -> name direction is persisted; the
//! name -> id direction is derived by [`TagCatalog::from_persisted`] every
//! time a snapshot is loaded.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{Result, TaggerError};

/// Numeric tag identifier. Always >= 1 once allocated.
pub type TagId = u32;

/// How a tag id should be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLabel {
    /// The id maps to a known name.
    Named(String),
    /// The id is referenced but has no name; shown as the raw id.
    Unknown(TagId),
}

impl fmt::Display for TagLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagLabel::Named(name) => f.write_str(name),
            TagLabel::Unknown(id) => write!(f, "{}", id),
        }
    }
}

/// Append-only catalog of tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    by_id: BTreeMap<TagId, String>,
    by_name: HashMap<String, TagId>,
    last_allocated: TagId,
}

impl TagCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a catalog from its persisted id -> name map.
    ///
    /// The reverse map is derived here and nowhere else. When two ids carry
    /// the same name the higher id wins the name -> id direction. A
    /// `last_allocated` below the highest id present is raised so that new
    /// allocations cannot collide with a historical id.
    pub fn from_persisted(by_id: BTreeMap<TagId, String>, last_allocated: TagId) -> Self {
        let mut by_name = HashMap::with_capacity(by_id.len());
        for (&id, name) in &by_id {
            if let Some(previous) = by_name.insert(name.clone(), id) {
                tracing::warn!(
                    "tag name '{}' is mapped by both id {} and id {}; using {}",
                    name,
                    previous,
                    id,
                    id
                );
            }
        }

        let highest = by_id.keys().next_back().copied().unwrap_or(0);
        let last_allocated = if highest > last_allocated {
            tracing::warn!(
                "last allocated tag id {} is below highest persisted id {}; raising it",
                last_allocated,
                highest
            );
            highest
        } else {
            last_allocated
        };

        Self {
            by_id,
            by_name,
            last_allocated,
        }
    }

    /// Return the id for `name`, allocating the next one if it is new.
    pub fn lookup_or_create(&mut self, name: &str) -> Result<TagId> {
        validate_tag_name(name)?;
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }

        let id = self
            .last_allocated
            .checked_add(1)
            .ok_or(TaggerError::TagIdsExhausted {
                last: self.last_allocated,
            })?;
        self.last_allocated = id;
        self.by_name.insert(name.to_string(), id);
        self.by_id.insert(id, name.to_string());
        tracing::debug!("allocated tag id {} for '{}'", id, name);
        Ok(id)
    }

    /// Look up an existing tag without allocating.
    pub fn id_of(&self, name: &str) -> Option<TagId> {
        self.by_name.get(name).copied()
    }

    /// Name for `id`, if one is recorded.
    pub fn name_of(&self, id: TagId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Display label for `id`, falling back to the raw id.
    pub fn label_of(&self, id: TagId) -> TagLabel {
        match self.name_of(id) {
            Some(name) => TagLabel::Named(name.to_string()),
            None => TagLabel::Unknown(id),
        }
    }

    /// All tags ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &str)> {
        self.by_id.iter().map(|(&id, name)| (id, name.as_str()))
    }

    /// The persisted id -> name direction.
    pub fn names_by_id(&self) -> &BTreeMap<TagId, String> {
        &self.by_id
    }

    /// Highest id ever allocated (0 when none).
    pub fn last_allocated(&self) -> TagId {
        self.last_allocated
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Reject names the catalog must never store.
pub fn validate_tag_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TaggerError::InvalidTag {
            message: "tag names must not be empty".to_string(),
        });
    }
    Ok(())
}
