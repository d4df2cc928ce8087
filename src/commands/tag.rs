//! Tag command handler - apply one tag to many files
//!
//! Paths are confined one at a time. A path that fails is reported and
//! skipped; the others are still tagged, and the snapshot is saved once at
//! the end. Any failure makes the command exit non-zero after saving.

use std::path::{Path, PathBuf};

use crate::catalog::validate_tag_name;
use crate::cli::OutputFormat;
use crate::commands::{json_output, CommandContext};
use crate::error::{Result, TaggerError};
use crate::sandbox::Existence;

/// Run the tag command
pub fn run_tag(tag: &str, paths: &[PathBuf], ctx: &CommandContext) -> Result<String> {
    validate_tag_name(tag)?;

    let mut snapshot = ctx.load_snapshot()?;
    let mut tagged = Vec::new();
    let mut failed: Vec<(&Path, TaggerError)> = Vec::new();

    for path in paths {
        match ctx.sandbox.confine(path, Existence::Required) {
            Ok(key) => {
                snapshot.add_tags(&key, &[tag], ctx.duplicates())?;
                tagged.push(key);
            }
            Err(e) => {
                tracing::debug!("skipping {}: {}", path.display(), e);
                failed.push((path.as_path(), e));
            }
        }
    }

    if !tagged.is_empty() {
        ctx.save_snapshot(&snapshot)?;
    }

    let output = match ctx.format {
        OutputFormat::Json => {
            let failures: Vec<serde_json::Value> = failed
                .iter()
                .map(|(path, e)| {
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "error": e.to_string(),
                    })
                })
                .collect();
            json_output(&serde_json::json!({
                "_type": "tag",
                "tag": tag,
                "tagged": tagged,
                "failed": failures,
            }))
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for key in &tagged {
                output.push_str(&format!("Added tag '{}' to '{}'\n", tag, key));
            }
            output
        }
    };

    if failed.is_empty() {
        return Ok(output);
    }

    // Successes are already persisted; main reports them before the failure.
    Err(TaggerError::PartialFailure {
        failed: failed.len(),
        total: paths.len(),
        output,
        failures: failed
            .iter()
            .map(|(path, e)| format!("{}: {}", path.display(), e))
            .collect(),
    })
}
