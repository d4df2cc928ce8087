//! Tagger: free-form tags for files in a directory tree
//!
//! The library keeps a small persisted index inside a working root:
//!
//! - [`sandbox`] confines user-supplied paths to the root and turns them into
//!   stable root-relative keys.
//! - [`catalog`] maps tag names to permanent numeric ids.
//! - [`file_index`] maps keys to the ids applied to each file.
//! - [`store`] loads and atomically saves the whole snapshot.
//! - [`query`] answers "files with tag" and "tags of file".
//!
//! The binary wraps these in a flag-style CLI ([`cli`], [`commands`]) and
//! an HTTP directory browser ([`server`]).
//!
//! # Example
//!
//! ```
//! use tagger::{DuplicatePolicy, IndexSnapshot, PathSandbox, QueryEngine};
//!
//! let mut snapshot = IndexSnapshot::empty();
//! snapshot.add_tags("/doc.txt", &["red"], DuplicatePolicy::Allow)?;
//!
//! let sandbox = PathSandbox::new("/work")?;
//! let engine = QueryEngine::new(&snapshot, &sandbox);
//! assert_eq!(engine.files_for_tag("red"), vec!["/doc.txt".to_string()]);
//! # Ok::<(), tagger::TaggerError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod file_index;
pub mod fs_utils;
pub mod query;
pub mod sandbox;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use catalog::{TagCatalog, TagId, TagLabel};
pub use cli::{Cli, Operation, OutputFormat};
pub use config::TaggerConfig;
pub use error::{Result, TaggerError};
pub use file_index::{DuplicatePolicy, FileEntry, FileIndex};
pub use query::{FileTags, QueryEngine};
pub use sandbox::{confine, Existence, PathSandbox};
pub use store::{IndexSnapshot, DEFAULT_INDEX_FILE, SCHEMA_VERSION};
