use crate::model::{ArchiveItem, ParaType};
use crate::paths;
use crate::storage::VaultStore;
use crate::transition::{Transition, TransitionReport};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::CommandContext;

/// Turn a note argument into a vault-relative path.
///
/// Accepts paths relative to the vault root, relative to the current
/// directory, or absolute.
pub fn resolve_note_path(ctx: &CommandContext, file: &Path) -> Result<PathBuf> {
    let vault_relative = paths::normalize(file);
    if !file.is_absolute() && ctx.vault.file_exists(&vault_relative) {
        return Ok(vault_relative);
    }
    Ok(ctx.vault.relativize(file)?)
}

/// Print `message` and read one line from stdin, trimmed.
pub fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        anyhow::bail!("No input given");
    }
    Ok(input.trim().to_string())
}

pub fn format_type(para_type: ParaType) -> colored::ColoredString {
    match para_type {
        ParaType::Project => "project".blue(),
        ParaType::Area => "area".magenta(),
        ParaType::Resource => "resource".cyan(),
    }
}

pub fn print_report(report: &TransitionReport) {
    let verb = match report.transition {
        Transition::Archive => "Archived".yellow(),
        Transition::Restore => "Restored".green(),
        Transition::Complete => "Completed".green(),
    };
    println!(
        "{} {} {} -> {}",
        verb,
        format_type(report.para_type),
        report.name().bold(),
        paths::display(&report.to)
    );
    if let Some(status) = report.status {
        println!("  Status: {}", format!("#{}", status).cyan());
    }
    for moved in &report.moved {
        println!(
            "  {} {} -> {}",
            "Moved".dimmed(),
            paths::display(&moved.from),
            paths::display(&moved.to)
        );
    }
    for warning in &report.warnings {
        println!("  {} {}", "Warning:".yellow(), warning);
    }
}

pub fn print_item_list(items: &[ArchiveItem], archive_root: &Path) {
    if items.is_empty() {
        println!("No notes found.");
        return;
    }

    for item in items {
        let marker = if paths::is_within(&item.path, archive_root) {
            "archived".dimmed()
        } else {
            "active".green()
        };
        println!(
            "[{}] {} {} {}",
            format_type(item.para_type),
            marker,
            item.name().bold(),
            paths::display(&item.path).dimmed()
        );
    }
}
