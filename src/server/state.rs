//! Shared state for the directory browser
//!
//! Handlers only ever read the filesystem under the root. The tag snapshot
//! is never opened by the server.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::sandbox::PathSandbox;

/// Browser state shared across requests.
#[derive(Debug, Clone)]
pub struct BrowserState {
    sandbox: PathSandbox,
    thumbnails: PathBuf,
}

impl BrowserState {
    /// State for browsing `root`, serving thumbnails from `thumbnails`.
    pub fn new(root: &Path, thumbnails: PathBuf) -> Result<Self> {
        Ok(Self {
            sandbox: PathSandbox::new(root)?,
            thumbnails,
        })
    }

    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }

    pub fn thumbnails(&self) -> &Path {
        &self.thumbnails
    }
}
