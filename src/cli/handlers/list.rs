use crate::cli::commands::ParaTypeArg;
use crate::scanner::{self, ScanOptions};
use anyhow::Result;

use super::CommandContext;
use super::utils::print_item_list;

pub fn handle_list(
    ctx: &CommandContext,
    archived: bool,
    r#type: Option<ParaTypeArg>,
    json: bool,
) -> Result<()> {
    let options = if archived {
        ScanOptions::archive(&ctx.config)
    } else {
        ScanOptions::vault(&ctx.config)
    }
    .with_type_filter(r#type.map(Into::into));

    let items = scanner::scan(&ctx.vault, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print_item_list(&items, &ctx.config.folders.archive_root());
    }
    Ok(())
}
