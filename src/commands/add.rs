//! Add command handler - tag one file with one or more tags

use std::path::Path;

use crate::cli::OutputFormat;
use crate::commands::{json_output, CommandContext};
use crate::error::Result;
use crate::sandbox::Existence;

/// Run the add command
pub fn run_add(path: &Path, tags: &[String], ctx: &CommandContext) -> Result<String> {
    let key = ctx.sandbox.confine(path, Existence::Required)?;

    let mut snapshot = ctx.load_snapshot()?;
    let ids = snapshot.add_tags(&key, tags, ctx.duplicates())?;
    ctx.save_snapshot(&snapshot)?;

    tracing::debug!("tagged {} with ids {:?}", key, ids);

    let output = match ctx.format {
        OutputFormat::Json => json_output(&serde_json::json!({
            "_type": "add",
            "path": key,
            "tags": tags,
            "ids": ids,
        })),
        OutputFormat::Text => {
            let mut output = String::new();
            if ctx.verbose {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                output.push_str(&format!("{}: tag ids {}\n", key, ids.join(", ")));
            }
            output.push_str("File tags added successfully\n");
            output
        }
    };
    Ok(output)
}
