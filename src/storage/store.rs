use super::markdown::Frontmatter;
use crate::error::Result;
use crate::paths;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// A child returned by [`VaultStore::list_children`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn name(&self) -> String {
        paths::entry_name(&self.path)
    }
}

/// File-store primitives the workflow runs on. Every path is relative to
/// the vault root.
pub trait VaultStore {
    fn read_content(&self, path: &Path) -> Result<String>;

    /// Create or overwrite a file.
    fn write_content(&self, path: &Path, content: &str) -> Result<()>;

    /// Move a file or folder. Fails if `to` already exists.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Create a folder and any missing parents.
    fn create_folder(&self, path: &Path) -> Result<()>;

    fn folder_exists(&self, path: &Path) -> bool;

    fn file_exists(&self, path: &Path) -> bool;

    /// Delete a file, an empty folder, or with `recursive` a whole folder.
    fn delete(&self, path: &Path, recursive: bool) -> Result<()>;

    /// Visible children of a folder, sorted by name.
    fn list_children(&self, folder: &Path) -> Result<Vec<Entry>>;

    fn exists(&self, path: &Path) -> bool {
        self.file_exists(path) || self.folder_exists(path)
    }

    /// Replace a file's text with `f(old)`. Returns the previous text.
    fn rewrite_content<F>(&self, path: &Path, f: F) -> Result<String>
    where
        F: FnOnce(&str) -> String,
    {
        let previous = self.read_content(path)?;
        let updated = f(&previous);
        if updated != previous {
            self.write_content(path, &updated)?;
        }
        Ok(previous)
    }

    fn read_metadata(&self, path: &Path) -> Result<Frontmatter> {
        let content = self.read_content(path)?;
        let (frontmatter, _) = Frontmatter::parse(&content)?;
        Ok(frontmatter)
    }

    /// Read-modify-write of the metadata block. The body is kept as is.
    /// Returns the previous text of the whole file.
    fn mutate_metadata<F>(&self, path: &Path, f: F) -> Result<String>
    where
        F: FnOnce(&mut Frontmatter),
    {
        let previous = self.read_content(path)?;
        let (mut frontmatter, body) = Frontmatter::parse(&previous)?;
        f(&mut frontmatter);
        let updated = frontmatter.render(body)?;
        if updated != previous {
            self.write_content(path, &updated)?;
        }
        Ok(previous)
    }
}
