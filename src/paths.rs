//! Vault path and naming helpers.
//!
//! All paths handled here are relative to the vault root. Containment is
//! decided segment by segment, so an archive folder named `4-Archive` never
//! matches `X-4-Archive-old`.

use std::path::{Component, Path, PathBuf};

const MARKDOWN_EXTENSION: &str = "md";

/// Drop `.` segments so `./1-Projects/a.md` and `1-Projects/a.md` compare equal.
pub fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Whether `path` is `root` or lies somewhere below it.
pub fn is_within(path: &Path, root: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}

/// Whether `path` sits directly inside `folder`.
pub fn is_direct_child(path: &Path, folder: &Path) -> bool {
    path.parent()
        .map(|parent| normalize(parent) == normalize(folder))
        .unwrap_or(false)
}

/// The folder holding `path` when that folder lies below `root` rather than
/// being `root` itself. Only the immediate parent counts, so sibling items
/// grouped in the same subfolder are never swept along.
///
/// `1-Projects/Launch/Launch.md` under `1-Projects` yields `1-Projects/Launch`;
/// `1-Projects/Client/Launch/Launch.md` yields `1-Projects/Client/Launch`;
/// `1-Projects/Launch.md` yields `None`.
pub fn owning_folder(path: &Path, root: &Path) -> Option<PathBuf> {
    let root = normalize(root);
    let parent = normalize(path.parent()?);
    if parent != root && parent.starts_with(&root) {
        Some(parent)
    } else {
        None
    }
}

/// Base name of a note without its extension.
pub fn note_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Final segment of a path (file or folder name).
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `_` followed by the lowercased area name.
pub fn companion_folder_name(area_name: &str) -> String {
    format!("_{}", area_name.to_lowercase())
}

pub fn markdown_file(name: &str) -> String {
    format!("{}.{}", name, MARKDOWN_EXTENSION)
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
        .unwrap_or(false)
}

/// Forward-slash rendering for messages and JSON output.
pub fn display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_within_is_segment_wise() {
        assert!(is_within(Path::new("4-Archive/Launch.md"), Path::new("4-Archive")));
        assert!(is_within(
            Path::new("4-Archive/Health/Health.md"),
            Path::new("4-Archive")
        ));
        assert!(!is_within(
            Path::new("X-4-Archive-old/Launch.md"),
            Path::new("4-Archive")
        ));
        assert!(!is_within(
            Path::new("1-Projects/4-Archive-notes/a.md"),
            Path::new("4-Archive")
        ));
    }

    #[test]
    fn test_is_within_nested_root_and_dot_segments() {
        assert!(is_within(
            Path::new("./Vault/Archive/a.md"),
            Path::new("Vault/Archive")
        ));
        assert!(!is_within(Path::new("Vault/a.md"), Path::new("Vault/Archive")));
    }

    #[test]
    fn test_owning_folder() {
        let root = Path::new("1-Projects");
        assert_eq!(
            owning_folder(Path::new("1-Projects/Launch/Launch.md"), root),
            Some(PathBuf::from("1-Projects/Launch"))
        );
        assert_eq!(
            owning_folder(Path::new("1-Projects/Launch/docs/Launch.md"), root),
            Some(PathBuf::from("1-Projects/Launch/docs"))
        );
        assert_eq!(
            owning_folder(Path::new("1-Projects/Client/Rebrand/Rebrand.md"), root),
            Some(PathBuf::from("1-Projects/Client/Rebrand"))
        );
        assert_eq!(owning_folder(Path::new("1-Projects/Launch.md"), root), None);
        assert_eq!(owning_folder(Path::new("Inbox/Launch.md"), root), None);
    }

    #[test]
    fn test_is_direct_child() {
        assert!(is_direct_child(
            Path::new("1-Projects/Launch.md"),
            Path::new("1-Projects")
        ));
        assert!(!is_direct_child(
            Path::new("1-Projects/Launch/Launch.md"),
            Path::new("1-Projects")
        ));
        assert!(is_direct_child(Path::new("Launch.md"), Path::new("")));
    }

    #[test]
    fn test_naming() {
        assert_eq!(companion_folder_name("Health"), "_health");
        assert_eq!(companion_folder_name("Side Hustle"), "_side hustle");
        assert_eq!(note_name(Path::new("2-Areas/Health.md")), "Health");
        assert_eq!(markdown_file("Launch"), "Launch.md");
        assert!(is_markdown(Path::new("a/B.MD")));
        assert!(!is_markdown(Path::new("a/b.png")));
    }
}
