//! Detects a note's PARA type and whether it is archived.
//!
//! The type comes from the note's tags, checked in
//! [`CLASSIFICATION_ORDER`]. A note tagged both `project` and `area` is a
//! project. The archived flag depends only on where the note lives.

use crate::config::FolderSettings;
use crate::error::Result;
use crate::model::{CLASSIFICATION_ORDER, Classification, ParaType};
use crate::paths;
use crate::storage::{Frontmatter, VaultStore};
use std::path::Path;

/// First PARA type, in precedence order, present among `tags`.
pub fn type_from_tags<S: AsRef<str>>(tags: &[S]) -> Option<ParaType> {
    let matching: Vec<ParaType> = CLASSIFICATION_ORDER
        .into_iter()
        .filter(|t| tags.iter().any(|tag| tag.as_ref().eq_ignore_ascii_case(t.tag())))
        .collect();
    if matching.len() > 1 {
        tracing::debug!(types = ?matching, "Note carries several PARA type tags, using the first");
    }
    matching.first().copied()
}

pub fn type_from_metadata(frontmatter: &Frontmatter) -> Option<ParaType> {
    type_from_tags(&frontmatter.tags())
}

/// Whether the folder holding `path` is the archive root or below it.
pub fn is_archived(path: &Path, folders: &FolderSettings) -> bool {
    path.parent()
        .map(|parent| paths::is_within(parent, &folders.archive_root()))
        .unwrap_or(false)
}

/// The active root folder (projects, areas or resources) containing `path`.
pub fn active_root_type(path: &Path, folders: &FolderSettings) -> Option<ParaType> {
    [ParaType::Project, ParaType::Area, ParaType::Resource]
        .into_iter()
        .find(|t| paths::is_within(path, &folders.root_for(*t)))
}

/// Classify the note at `path`. Reads metadata only; never writes.
pub fn classify<S: VaultStore>(
    store: &S,
    path: &Path,
    folders: &FolderSettings,
) -> Result<Classification> {
    let frontmatter = store.read_metadata(path)?;
    Ok(Classification {
        para_type: type_from_metadata(&frontmatter),
        archived: is_archived(path, folders),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsVault;
    use tempfile::TempDir;

    #[test]
    fn test_precedence_project_over_area() {
        assert_eq!(type_from_tags(&["area", "project"]), Some(ParaType::Project));
        assert_eq!(type_from_tags(&["area", "resource"]), Some(ParaType::Resource));
        assert_eq!(type_from_tags(&["Area"]), Some(ParaType::Area));
        assert_eq!(type_from_tags(&["marketing"]), None);
        assert_eq!(type_from_tags::<&str>(&[]), None);
    }

    #[test]
    fn test_is_archived_uses_ancestor_check() {
        let folders = FolderSettings::default();
        assert!(is_archived(Path::new("4-Archive/Launch.md"), &folders));
        assert!(is_archived(Path::new("4-Archive/Health/Health.md"), &folders));
        assert!(!is_archived(Path::new("1-Projects/Launch.md"), &folders));
        assert!(!is_archived(
            Path::new("X-4-Archive-old/Launch.md"),
            &folders
        ));
        assert!(!is_archived(Path::new("Launch.md"), &folders));
    }

    #[test]
    fn test_active_root_type() {
        let folders = FolderSettings::default();
        assert_eq!(
            active_root_type(Path::new("1-Projects/Launch/Launch.md"), &folders),
            Some(ParaType::Project)
        );
        assert_eq!(
            active_root_type(Path::new("2-Areas/Health.md"), &folders),
            Some(ParaType::Area)
        );
        assert_eq!(active_root_type(Path::new("Inbox/x.md"), &folders), None);
    }

    #[test]
    fn test_classify_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FsVault::new(temp_dir.path());
        let path = Path::new("4-Archive/Launch.md");
        vault
            .write_content(path, "---\ntags: [area, project]\n---\nStatus:: #aborted\n")
            .unwrap();
        let folders = FolderSettings::default();

        let first = classify(&vault, path, &folders).unwrap();
        let second = classify(&vault, path, &folders).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.para_type, Some(ParaType::Project));
        assert!(first.archived);
    }

    #[test]
    fn test_classify_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FsVault::new(temp_dir.path());
        let folders = FolderSettings::default();
        assert!(classify(&vault, Path::new("nope.md"), &folders).is_err());
    }
}
