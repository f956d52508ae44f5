use crate::cli::commands::ParaTypeArg;
use crate::classifier;
use crate::model::ArchiveItem;
use crate::paths;
use crate::scanner::{self, ScanOptions};
use crate::transition::TransitionReport;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::CommandContext;
use super::utils::{format_type, print_report, prompt, resolve_note_path};

/// Parameters for restore operation
pub struct RestoreParams {
    pub file: Option<PathBuf>,
    pub r#type: Option<ParaTypeArg>,
    pub query: Option<String>,
    pub pick: Option<usize>,
    pub json: bool,
}

pub fn handle_restore(ctx: &CommandContext, params: RestoreParams) -> Result<()> {
    let engine = ctx.engine();

    // An archived file is restored directly; anything else falls back to the picker
    if let Some(file) = &params.file {
        let path = resolve_note_path(ctx, file)?;
        if classifier::is_archived(&path, &ctx.config.folders) {
            let report = engine.restore(&path)?;
            return print_outcome(&report, params.json);
        }
        tracing::debug!(path = %paths::display(&path), "Not archived, choosing from the archive");
    }

    let options = ScanOptions::archive(&ctx.config)
        .with_type_filter(params.r#type.map(Into::into));
    let items = scanner::scan(&ctx.vault, &options)?;
    let items = scanner::filter_by_name(items, params.query.as_deref().unwrap_or(""));

    if items.is_empty() {
        if params.json {
            println!("null");
        } else {
            println!("No archived notes to restore.");
        }
        return Ok(());
    }

    let Some(item) = choose(&items, params.pick, params.json)? else {
        println!("Cancelled.");
        return Ok(());
    };

    let report = engine.restore_item(&item.into_item())?;
    print_outcome(&report, params.json)
}

/// The item picked by `--pick` or interactively. `None` if the user gave no choice.
fn choose(items: &[ArchiveItem], pick: Option<usize>, json: bool) -> Result<Option<ArchiveItem>> {
    let index = match pick {
        Some(n) => n,
        None => {
            if json {
                anyhow::bail!("--pick is required with --json when no archived file is given");
            }
            for (i, item) in items.iter().enumerate() {
                println!(
                    "{:>3}. [{}] {} {}",
                    i + 1,
                    format_type(item.para_type),
                    item.name().bold(),
                    paths::display(&item.path).dimmed()
                );
            }
            let answer = prompt(&format!("Restore which? [1-{}] ", items.len()))?;
            if answer.is_empty() {
                return Ok(None);
            }
            answer
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("Invalid selection: {}", answer))?
        }
    };

    match index.checked_sub(1).and_then(|i| items.get(i)) {
        Some(item) => Ok(Some(item.clone())),
        None => anyhow::bail!(
            "Invalid selection: {} (choose 1-{})",
            index,
            items.len()
        ),
    }
}

fn print_outcome(report: &TransitionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    Ok(())
}
