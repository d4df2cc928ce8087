//! Command modules for the tagger CLI
//!
//! Each module implements a single operation:
//! - `add` - Add tags to one file
//! - `tag` - Apply one tag to many files
//! - `find` - List files carrying a tag
//! - `status` - Show the tags of a file
//! - `list` - List every known tag
//! - `serve` - Run the directory browser
//!
//! All handlers take their arguments plus a shared `CommandContext` holding
//! the working root, the loaded configuration and the output format.

pub mod add;
pub mod find;
pub mod list;
pub mod serve;
pub mod status;
pub mod tag;

pub use add::run_add;
pub use find::run_find;
pub use list::run_list;
pub use serve::run_serve;
pub use status::run_status;
pub use tag::run_tag;

use std::path::{Path, PathBuf};

use crate::cli::{Operation, OutputFormat};
use crate::config::TaggerConfig;
use crate::error::{Result, TaggerError};
use crate::file_index::DuplicatePolicy;
use crate::fs_utils;
use crate::sandbox::PathSandbox;
use crate::store::{self, IndexSnapshot};

/// Shared context passed to all command handlers
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
    /// Root plus the directory relative arguments resolve against
    pub sandbox: PathSandbox,
    /// Configuration loaded from the root
    pub config: TaggerConfig,
    /// Snapshot file location, resolved once
    pub index_path: PathBuf,
}

impl CommandContext {
    /// Build a context for `root`, resolving relative arguments against `cwd`.
    pub fn new(
        root: &Path,
        cwd: &Path,
        config: TaggerConfig,
        format: OutputFormat,
        verbose: bool,
    ) -> Result<Self> {
        let sandbox = PathSandbox::new(root)?.with_base(cwd);
        let index_path = config.index_path(sandbox.root());
        Ok(Self {
            format,
            verbose,
            sandbox,
            config,
            index_path,
        })
    }

    /// Effective duplicate-tag policy, after command-line overrides.
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.config.index.duplicates
    }

    /// The working root.
    pub fn root(&self) -> &Path {
        self.sandbox.root()
    }

    /// Load the snapshot for this root.
    pub fn load_snapshot(&self) -> Result<IndexSnapshot> {
        store::load(&self.index_path)
    }

    /// Persist the snapshot for this root.
    pub fn save_snapshot(&self, snapshot: &IndexSnapshot) -> Result<()> {
        store::save(&self.index_path, snapshot)
    }
}

/// Resolve the working root: `--root` (relative to `cwd`) or `cwd` itself.
///
/// The result is canonical so that it matches what the OS reports as the
/// current directory.
pub fn resolve_root(requested: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let root = match requested {
        Some(path) => cwd.join(path),
        None => cwd.to_path_buf(),
    };
    let canonical = root.canonicalize().map_err(|e| TaggerError::ConfigError {
        message: format!("cannot use {} as root: {}", root.display(), e),
    })?;
    if !canonical.is_dir() {
        return Err(TaggerError::ConfigError {
            message: format!("root {} is not a directory", canonical.display()),
        });
    }
    Ok(fs_utils::normalize_path(&canonical))
}

/// Dispatch one operation.
pub fn run_operation(operation: &Operation, ctx: &CommandContext) -> Result<String> {
    match operation {
        Operation::Add { path, tags } => run_add(path, tags, ctx),
        Operation::Tag { tag, paths } => run_tag(tag, paths, ctx),
        Operation::Find { tag } => run_find(tag, ctx),
        Operation::Status { path } => run_status(path, ctx),
        Operation::List => run_list(ctx),
        Operation::Server => run_serve(ctx),
    }
}

/// Pretty-print a JSON result followed by a newline
pub(crate) fn json_output(value: &serde_json::Value) -> String {
    let mut output = serde_json::to_string_pretty(value).unwrap_or_default();
    output.push('\n');
    output
}
