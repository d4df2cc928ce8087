//! Find command handler - list files carrying a tag

use crate::cli::OutputFormat;
use crate::commands::{json_output, CommandContext};
use crate::error::Result;
use crate::query::QueryEngine;

/// Run the find command
pub fn run_find(tag: &str, ctx: &CommandContext) -> Result<String> {
    let snapshot = ctx.load_snapshot()?;
    let engine = QueryEngine::new(&snapshot, &ctx.sandbox);
    let keys = engine.files_for_tag(tag);

    let output = match ctx.format {
        OutputFormat::Json => {
            let files: Vec<serde_json::Value> = keys
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "path": key,
                        "absolute": ctx.sandbox.absolute(key).display().to_string(),
                    })
                })
                .collect();
            json_output(&serde_json::json!({
                "_type": "find",
                "tag": tag,
                "count": keys.len(),
                "files": files,
            }))
        }
        OutputFormat::Text => {
            if keys.is_empty() {
                format!("No files found with tag: {}\n", tag)
            } else {
                let mut output = format!("Files with tag '{}':\n", tag);
                for key in &keys {
                    output.push_str(&format!("  {}\n", ctx.sandbox.absolute(key).display()));
                }
                output
            }
        }
    };
    Ok(output)
}
