//! Status command handler - show the tags of one file

use std::path::Path;

use crate::cli::OutputFormat;
use crate::commands::{json_output, CommandContext};
use crate::error::Result;
use crate::query::QueryEngine;

/// Run the status command
pub fn run_status(path: &Path, ctx: &CommandContext) -> Result<String> {
    let snapshot = ctx.load_snapshot()?;
    let engine = QueryEngine::new(&snapshot, &ctx.sandbox);
    let found = engine.tags_for_path(path)?;

    let labels: Option<Vec<String>> = found
        .tags
        .as_ref()
        .map(|tags| tags.iter().map(ToString::to_string).collect());

    let output = match ctx.format {
        OutputFormat::Json => json_output(&serde_json::json!({
            "_type": "status",
            "path": found.key,
            "tagged": labels.is_some(),
            "tags": labels.unwrap_or_default(),
        })),
        OutputFormat::Text => match labels {
            None => "File not tagged\n".to_string(),
            Some(labels) => {
                let mut output = format!("Existing tags for '{}':\n", found.key);
                for label in labels {
                    output.push_str(&format!("  {}\n", label));
                }
                output
            }
        },
    };
    Ok(output)
}
