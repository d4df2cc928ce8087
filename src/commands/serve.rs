//! Serve command handler - run the directory browser
//!
//! This creates a tokio runtime and blocks on the HTTP server until Ctrl-C.
//! The browser only reads the filesystem; the tag snapshot is not loaded.

use crate::commands::CommandContext;
use crate::error::{Result, TaggerError};
use crate::server::{self, BrowserState};

/// Run the browser
pub fn run_serve(ctx: &CommandContext) -> Result<String> {
    let state = BrowserState::new(ctx.root(), ctx.config.server.thumbnail_dir())?;
    let addr = ctx.config.server.addr.clone();

    let runtime = tokio::runtime::Runtime::new().map_err(|e| TaggerError::ServerError {
        message: format!("Failed to create tokio runtime: {}", e),
    })?;
    runtime.block_on(server::serve(&addr, state))?;

    // Server exits cleanly - no output needed
    Ok(String::new())
}
