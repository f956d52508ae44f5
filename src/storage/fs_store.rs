use super::store::{Entry, EntryKind, VaultStore};
use crate::error::{ParaError, Result};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// [`VaultStore`] backed by a directory on local disk.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a vault-relative path. Rejects paths that would
    /// leave the vault.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(ParaError::Storage(format!(
                        "Path is not inside the vault: {}",
                        path.display()
                    )));
                }
            }
        }
        Ok(self.root.join(path))
    }

    /// Vault-relative form of a path that may be absolute or relative to
    /// the current directory.
    pub fn relativize(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
        let absolute = absolute.canonicalize().unwrap_or(absolute);
        absolute
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ParaError::NotFound(format!(
                    "{} is not inside the vault at {}",
                    path.display(),
                    self.root.display()
                ))
            })
    }

    /// Atomically write content to a file using temp file + rename.
    fn atomic_write(&self, target_path: &Path, content: &str) -> Result<()> {
        let target_dir = target_path
            .parent()
            .ok_or_else(|| ParaError::Storage("Target path has no parent directory".to_string()))?;

        let mut temp_file = NamedTempFile::new_in(target_dir)
            .map_err(|e| ParaError::Storage(format!("Failed to create temp file: {}", e)))?;

        use std::io::Write;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| ParaError::Storage(format!("Failed to write to temp file: {}", e)))?;

        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| ParaError::Storage(format!("Failed to sync temp file: {}", e)))?;

        temp_file
            .persist(target_path)
            .map_err(|e| ParaError::Storage(format!("Failed to persist temp file: {}", e)))?;

        Ok(())
    }
}

impl VaultStore for FsVault {
    fn read_content(&self, path: &Path) -> Result<String> {
        let absolute = self.resolve(path)?;
        if !absolute.is_file() {
            return Err(ParaError::NotFound(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(absolute)?)
    }

    fn write_content(&self, path: &Path, content: &str) -> Result<()> {
        let absolute = self.resolve(path)?;
        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.atomic_write(&absolute, content)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        if !source.exists() {
            return Err(ParaError::NotFound(from.display().to_string()));
        }
        if target.exists() {
            return Err(ParaError::Storage(format!(
                "Destination already exists: {}",
                to.display()
            )));
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(from = %from.display(), to = %to.display(), "Moving");
        std::fs::rename(&source, &target)?;
        Ok(())
    }

    fn create_folder(&self, path: &Path) -> Result<()> {
        let absolute = self.resolve(path)?;
        if absolute.is_file() {
            return Err(ParaError::Storage(format!(
                "A file exists where a folder was expected: {}",
                path.display()
            )));
        }
        std::fs::create_dir_all(absolute)?;
        Ok(())
    }

    fn folder_exists(&self, path: &Path) -> bool {
        self.resolve(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn delete(&self, path: &Path, recursive: bool) -> Result<()> {
        let absolute = self.resolve(path)?;
        if absolute == self.root {
            return Err(ParaError::Storage(
                "Refusing to delete the vault root".to_string(),
            ));
        }
        if absolute.is_dir() {
            if recursive {
                std::fs::remove_dir_all(&absolute)?;
            } else {
                std::fs::remove_dir(&absolute)?;
            }
        } else if absolute.is_file() {
            std::fs::remove_file(&absolute)?;
        } else {
            return Err(ParaError::NotFound(path.display().to_string()));
        }
        tracing::debug!(path = %path.display(), recursive, "Deleted");
        Ok(())
    }

    fn list_children(&self, folder: &Path) -> Result<Vec<Entry>> {
        let absolute = self.resolve(folder)?;
        if !absolute.is_dir() {
            return Err(ParaError::NotFound(folder.display().to_string()));
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&absolute)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            // Hidden entries: config, editor state, in-flight temp files
            if name.starts_with('.') {
                continue;
            }
            let file_type = entry.file_type()?;
            let kind = if file_type.is_dir() {
                EntryKind::Folder
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            entries.push(Entry {
                path: folder.join(&name),
                kind,
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
