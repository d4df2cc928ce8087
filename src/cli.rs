//! CLI argument definitions using clap
//!
//! The interface is flag-style: exactly one operation flag per invocation,
//! plus global options that apply to all of them.

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{Result, TaggerError};
use crate::file_index::DuplicatePolicy;

/// Attach tags to files in the working directory and find them again
#[derive(Parser, Debug)]
#[command(name = "tagger")]
#[command(about = "Attach free-form tags to files in a directory tree and query them")]
#[command(version)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["add", "tag", "find", "status", "list", "server"])
))]
pub struct Cli {
    /// Add one or more tags to a file
    #[arg(long, num_args = 2.., value_names = ["PATH", "TAG"])]
    pub add: Option<Vec<String>>,

    /// Apply one tag to each of the given files
    #[arg(long, num_args = 2.., value_names = ["TAG", "PATH"])]
    pub tag: Option<Vec<String>>,

    /// List files carrying a tag
    #[arg(long, value_name = "TAG")]
    pub find: Option<String>,

    /// Show the tags of a file
    #[arg(long, value_name = "PATH")]
    pub status: Option<PathBuf>,

    /// List all known tags
    #[arg(long)]
    pub list: bool,

    /// Start the directory browser
    #[arg(long)]
    pub server: bool,

    /// Working root (defaults to the current directory)
    #[arg(long, value_name = "DIR", env = "TAGGER_ROOT")]
    pub root: Option<PathBuf>,

    /// Browser listen address (overrides server.addr)
    #[arg(long, value_name = "ADDR", requires = "server")]
    pub addr: Option<String>,

    /// Append a tag id again when a file already has it
    #[arg(long, conflicts_with = "skip_duplicates")]
    pub allow_duplicates: bool,

    /// Ignore a tag a file already has
    #[arg(long)]
    pub skip_duplicates: bool,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON - standard JSON output for machine parsing
    Json,
}

/// The single operation requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add { path: PathBuf, tags: Vec<String> },
    Tag { tag: String, paths: Vec<PathBuf> },
    Find { tag: String },
    Status { path: PathBuf },
    List,
    Server,
}

impl Cli {
    /// Resolve the operation flags into one [`Operation`].
    pub fn operation(&self) -> Result<Operation> {
        if let Some(values) = &self.add {
            let (path, tags) = split_leading(values, "--add <PATH> <TAG>...")?;
            return Ok(Operation::Add {
                path: PathBuf::from(path),
                tags: tags.to_vec(),
            });
        }
        if let Some(values) = &self.tag {
            let (tag, paths) = split_leading(values, "--tag <TAG> <PATH>...")?;
            return Ok(Operation::Tag {
                tag: tag.clone(),
                paths: paths.iter().map(PathBuf::from).collect(),
            });
        }
        if let Some(tag) = &self.find {
            return Ok(Operation::Find { tag: tag.clone() });
        }
        if let Some(path) = &self.status {
            return Ok(Operation::Status { path: path.clone() });
        }
        if self.list {
            return Ok(Operation::List);
        }
        if self.server {
            return Ok(Operation::Server);
        }
        Err(TaggerError::Usage {
            message: "one of --add, --tag, --find, --status, --list or --server is required"
                .to_string(),
        })
    }

    /// Duplicate policy requested on the command line, if any.
    pub fn duplicate_override(&self) -> Option<DuplicatePolicy> {
        if self.skip_duplicates {
            Some(DuplicatePolicy::Skip)
        } else if self.allow_duplicates {
            Some(DuplicatePolicy::Allow)
        } else {
            None
        }
    }
}

fn split_leading<'a>(values: &'a [String], usage: &str) -> Result<(&'a String, &'a [String])> {
    match values.split_first() {
        Some((first, rest)) if !rest.is_empty() => Ok((first, rest)),
        _ => Err(TaggerError::Usage {
            message: usage.to_string(),
        }),
    }
}
