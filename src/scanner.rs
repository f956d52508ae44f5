//! Walks a folder tree and lists the PARA notes found in it.
//!
//! Used for restore pickers (archive root) and vault-wide listings. Folders
//! whose name starts with `_` are companion folders and are not descended
//! into. Notes without a PARA type tag are left out.

use crate::classifier;
use crate::config::ParaConfig;
use crate::error::Result;
use crate::model::{ArchiveItem, ParaType};
use crate::paths;
use crate::storage::VaultStore;
use std::path::{Path, PathBuf};

const COMPANION_PREFIX: char = '_';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub type_filter: Option<ParaType>,
    /// Folders to skip entirely, e.g. the templates folder.
    pub exclude: Vec<PathBuf>,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            type_filter: None,
            exclude: Vec::new(),
        }
    }

    /// Every archived note.
    pub fn archive(config: &ParaConfig) -> Self {
        Self::new(config.folders.archive_root())
    }

    /// Every note in the vault outside the templates folder.
    pub fn vault(config: &ParaConfig) -> Self {
        Self::new(PathBuf::new()).excluding(config.templates.folder_path())
    }

    pub fn with_type(self, para_type: ParaType) -> Self {
        self.with_type_filter(Some(para_type))
    }

    pub fn with_type_filter(mut self, type_filter: Option<ParaType>) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn excluding(mut self, folder: impl Into<PathBuf>) -> Self {
        self.exclude.push(folder.into());
        self
    }

    fn skips(&self, folder: &Path) -> bool {
        self.exclude.iter().any(|ex| paths::is_within(folder, ex))
    }
}

/// Materialize the list of PARA notes under `options.root`, in path order.
pub fn scan<S: VaultStore>(store: &S, options: &ScanOptions) -> Result<Vec<ArchiveItem>> {
    let mut items = Vec::new();
    if !store.folder_exists(&options.root) {
        tracing::debug!(root = %paths::display(&options.root), "Scan root does not exist");
        return Ok(items);
    }
    walk(store, &options.root, options, &mut items)?;
    tracing::debug!(
        root = %paths::display(&options.root),
        found = items.len(),
        "Scan finished"
    );
    Ok(items)
}

fn walk<S: VaultStore>(
    store: &S,
    folder: &Path,
    options: &ScanOptions,
    items: &mut Vec<ArchiveItem>,
) -> Result<()> {
    for entry in store.list_children(folder)? {
        if entry.is_folder() {
            if entry.name().starts_with(COMPANION_PREFIX) || options.skips(&entry.path) {
                continue;
            }
            walk(store, &entry.path, options, items)?;
            continue;
        }

        if !paths::is_markdown(&entry.path) {
            continue;
        }
        let frontmatter = match store.read_metadata(&entry.path) {
            Ok(frontmatter) => frontmatter,
            Err(e) => {
                tracing::warn!(
                    path = %paths::display(&entry.path),
                    error = %e,
                    "Failed to read note metadata"
                );
                continue;
            }
        };
        let Some(para_type) = classifier::type_from_metadata(&frontmatter) else {
            continue;
        };
        if options.type_filter.is_some_and(|wanted| wanted != para_type) {
            continue;
        }
        items.push(ArchiveItem {
            path: entry.path,
            para_type,
        });
    }
    Ok(())
}

/// Items whose name contains `query`, ignoring case. An empty query keeps all.
pub fn filter_by_name(items: Vec<ArchiveItem>, query: &str) -> Vec<ArchiveItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.name().to_lowercase().contains(&query))
        .collect()
}
