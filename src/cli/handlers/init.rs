use crate::config::{CONFIG_FILE, ParaConfig};
use crate::error::ParaError;
use crate::paths;
use crate::storage::FsVault;
use crate::templates;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn handle_init(
    vault: Option<&Path>,
    folder_structure: bool,
    no_companion_dir: bool,
) -> Result<()> {
    let root = match vault {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(ParaError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let mut config = ParaConfig::default();
    config.folders.use_folder_structure = folder_structure;
    config.folders.use_companion_dir = !no_companion_dir;

    std::fs::create_dir_all(&root)?;
    let store = FsVault::new(&root);
    let report = templates::initialize_vault(&store, &config)?;

    config.save(&config_path)?;

    println!("{} PARA vault in {}", "Initialized".green(), root.display());
    println!("  Config:    {}", config_path.display());
    for folder in &report.folders {
        println!("  Folder:    {}", paths::display(folder));
    }
    for template in &report.templates {
        println!("  Template:  {}", paths::display(template));
    }

    Ok(())
}
