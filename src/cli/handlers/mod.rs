mod archive;
mod complete;
mod create;
mod init;
mod list;
mod restore;
mod utils;

pub use archive::handle_archive;
pub use complete::handle_complete;
pub use create::handle_create;
pub use init::handle_init;
pub use list::handle_list;
pub use restore::{RestoreParams, handle_restore};

use crate::config::ParaConfig;
use crate::storage::FsVault;
use crate::transition::TransitionEngine;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: ParaConfig,
    pub root: PathBuf,
    pub vault: FsVault,
}

impl CommandContext {
    pub fn new(config: ParaConfig, root: PathBuf) -> Self {
        let vault = FsVault::new(&root);
        Self {
            config,
            root,
            vault,
        }
    }

    /// Find the vault config starting at `vault` or the current directory.
    pub fn load(vault: Option<&Path>) -> Result<Self> {
        let start = match vault {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let (config, root) =
            ParaConfig::load(&start).context("Failed to load para configuration")?;
        Ok(Self::new(config, root))
    }

    pub fn engine(&self) -> TransitionEngine<'_, FsVault> {
        TransitionEngine::new(&self.vault, &self.config.folders)
    }
}
