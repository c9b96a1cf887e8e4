use anyhow::Result;
use pmem_context::{format_context_for_prompt, load_context};
use pmem_core::OutputFormat;

use crate::CommandContext;

pub(crate) fn handle_context(ctx: &CommandContext) -> Result<()> {
    let raw = ctx.source().read();
    let loaded = load_context(&raw.inputs(), &ctx.config.context)?;

    match ctx.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "context": loaded.context,
                "warnings": loaded.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for warning in &loaded.warnings {
                eprintln!("Warning: {warning}");
            }
            print!("{}", format_context_for_prompt(&loaded.context));
        }
    }
    Ok(())
}
