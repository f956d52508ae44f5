use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use para::cli::handlers::{self, CommandContext, RestoreParams};
use para::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    para::logging::init(cli.verbose, cli.log_file.clone());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{} {:#}", "FAILED:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let vault = cli.vault.as_deref();

    match cli.command {
        Commands::Init {
            folder_structure,
            no_companion_dir,
        } => handlers::handle_init(vault, folder_structure, no_companion_dir),
        Commands::Create {
            r#type,
            name,
            area,
            open,
            json,
        } => {
            let ctx = CommandContext::load(vault)?;
            handlers::handle_create(&ctx, r#type, name, area, open, json)
        }
        Commands::Archive { file, json } => {
            let ctx = CommandContext::load(vault)?;
            handlers::handle_archive(&ctx, &file, json)
        }
        Commands::Restore {
            file,
            r#type,
            query,
            pick,
            json,
        } => {
            let ctx = CommandContext::load(vault)?;
            handlers::handle_restore(
                &ctx,
                RestoreParams {
                    file,
                    r#type,
                    query,
                    pick,
                    json,
                },
            )
        }
        Commands::Complete { file, json } => {
            let ctx = CommandContext::load(vault)?;
            handlers::handle_complete(&ctx, &file, json)
        }
        Commands::List {
            archived,
            r#type,
            json,
        } => {
            let ctx = CommandContext::load(vault)?;
            handlers::handle_list(&ctx, archived, r#type, json)
        }
    }
}
