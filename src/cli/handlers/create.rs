use crate::cli::commands::ParaTypeArg;
use crate::creator::{self, CreateOutcome, CreateRequest};
use crate::model::ParaType;
use crate::paths;
use crate::validation;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::{format_type, prompt};

pub fn handle_create(
    ctx: &CommandContext,
    r#type: ParaTypeArg,
    name: Option<String>,
    area: Option<String>,
    open: bool,
    json: bool,
) -> Result<()> {
    let para_type: ParaType = r#type.into();

    let (name, area) = match name {
        Some(name) => (name, area),
        None => {
            let name = prompt_for_name(para_type)?;
            let area = match area {
                None if para_type == ParaType::Project => {
                    let answer = prompt("Area (leave empty for none): ")?;
                    (!answer.is_empty()).then_some(answer)
                }
                other => other,
            };
            (name, area)
        }
    };

    let request = CreateRequest::new(para_type, name).with_area(area);
    let outcome = creator::create_item(&ctx.vault, &ctx.config, &request)?;
    let item = outcome.item();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match &outcome {
            CreateOutcome::Created {
                companion_folder, ..
            } => {
                println!(
                    "{} {} {} -> {}",
                    "Created".green(),
                    format_type(para_type),
                    item.name().bold(),
                    paths::display(&item.path)
                );
                if let Some(folder) = companion_folder {
                    println!("  Folder: {}", paths::display(folder));
                }
            }
            CreateOutcome::Existing { .. } => {
                println!(
                    "{} {} {} already exists at {}",
                    "Exists".yellow(),
                    format_type(para_type),
                    item.name().bold(),
                    paths::display(&item.path)
                );
            }
        }
    }

    if open {
        let absolute = ctx.root.join(&item.path);
        open::that(&absolute)
            .with_context(|| format!("Failed to open {}", absolute.display()))?;
    }
    Ok(())
}

/// Ask for a name until one passes validation.
fn prompt_for_name(para_type: ParaType) -> Result<String> {
    loop {
        let input = prompt(&format!("{} name: ", para_type.label()))?;
        match validation::validate_name(&input) {
            Ok(name) => return Ok(name),
            Err(e) => eprintln!("{} {}", "Invalid name:".red(), e),
        }
    }
}
