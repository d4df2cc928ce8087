//! Path confinement for CLI arguments and browser requests
//!
//! Every path that reaches the index or the directory browser goes through
//! [`PathSandbox::confine`]. Resolution is purely lexical: `.` and `..` are
//! folded without consulting the filesystem, and symlinks are not followed.
//! The containment check compares whole path components, so a root of
//! `/a/b` never admits `/a/bc`.
//!
//! A confined path is returned as a root-relative key that always starts with
//! `/` and uses `/` between components regardless of platform. That key is
//! what the file index stores.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, TaggerError};

/// Whether [`PathSandbox::confine`] must also prove the path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// The resolved path must exist on disk (CLI arguments, browser requests).
    Required,
    /// Only the containment rule applies (lookups of already-stored keys).
    Optional,
}

/// A trusted root plus the base directory relative candidates resolve against.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
    base: PathBuf,
}

impl PathSandbox {
    /// Create a sandbox for an absolute root.
    ///
    /// Relative candidates resolve against the root until [`with_base`] says
    /// otherwise.
    ///
    /// [`with_base`]: PathSandbox::with_base
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_absolute() {
            return Err(TaggerError::ConfigError {
                message: format!("root must be an absolute path: {}", root.display()),
            });
        }
        let root = normalize_lexically(root);
        Ok(Self {
            base: root.clone(),
            root,
        })
    }

    /// Resolve relative candidates against `base` instead of the root.
    ///
    /// A relative `base` is itself taken relative to the root.
    pub fn with_base(mut self, base: impl AsRef<Path>) -> Self {
        self.base = normalize_lexically(&self.root.join(base.as_ref()));
        self
    }

    /// The normalized root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a candidate to an absolute, lexically normalized path.
    pub fn resolve(&self, candidate: &Path) -> PathBuf {
        normalize_lexically(&self.base.join(candidate))
    }

    /// Confine `candidate` to the root and return its index key.
    pub fn confine(&self, candidate: &Path, existence: Existence) -> Result<String> {
        let resolved = self.resolve(candidate);

        let relative = resolved
            .strip_prefix(&self.root)
            .map_err(|_| TaggerError::OutsideRoot {
                path: resolved.clone(),
                root: self.root.clone(),
            })?;

        if existence == Existence::Required {
            match fs::metadata(&resolved) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(TaggerError::NotFound { path: resolved });
                }
                Err(e) => return Err(TaggerError::Io(e)),
            }
        }

        Ok(key_from_relative(relative))
    }

    /// Join an index key back onto the root.
    pub fn absolute(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in key.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path
    }
}

/// Confine an existing `candidate` to `root`.
///
/// Shorthand for a sandbox whose relative base is the root itself.
pub fn confine(root: &Path, candidate: &Path) -> Result<String> {
    PathSandbox::new(root)?.confine(candidate, Existence::Required)
}

/// Fold `.` and `..` segments without touching the filesystem.
///
/// `..` at the top of an absolute path stays at the top, as in POSIX.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_in_name = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if ends_in_name {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

fn key_from_relative(relative: &Path) -> String {
    let mut key = String::from("/");
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    key.push_str(&parts.join("/"));
    key
}
