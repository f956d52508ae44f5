use anyhow::Result;
use std::path::Path;

use super::CommandContext;
use super::utils::{print_report, resolve_note_path};

pub fn handle_archive(ctx: &CommandContext, file: &Path, json: bool) -> Result<()> {
    let path = resolve_note_path(ctx, file)?;
    let report = ctx.engine().archive(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
