//! List command handler - every known tag name

use crate::cli::OutputFormat;
use crate::commands::{json_output, CommandContext};
use crate::error::Result;
use crate::query::QueryEngine;

/// Run the list command
pub fn run_list(ctx: &CommandContext) -> Result<String> {
    let snapshot = ctx.load_snapshot()?;
    let engine = QueryEngine::new(&snapshot, &ctx.sandbox);
    let names = engine.tag_names();

    let output = match ctx.format {
        OutputFormat::Json => {
            let tags: Vec<serde_json::Value> = snapshot
                .catalog
                .iter()
                .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
                .collect();
            json_output(&serde_json::json!({
                "_type": "list",
                "count": tags.len(),
                "tags": tags,
            }))
        }
        OutputFormat::Text => {
            let mut output = String::from("Existing tags:\n");
            for name in names {
                output.push_str(&format!("  {}\n", name));
            }
            output
        }
    };
    Ok(output)
}
