use super::types::ParaType;
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A note representing a project, area or resource, addressed by its
/// vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParaItem {
    pub path: PathBuf,

    #[serde(rename = "type")]
    pub para_type: ParaType,
}

impl ParaItem {
    pub fn new(path: impl Into<PathBuf>, para_type: ParaType) -> Self {
        Self {
            path: path.into(),
            para_type,
        }
    }

    pub fn name(&self) -> String {
        paths::note_name(&self.path)
    }

    /// Location of the area's `_<name>` companion folder, next to the note.
    /// Always `None` for projects and resources.
    pub fn companion_folder(&self) -> Option<PathBuf> {
        if self.para_type != ParaType::Area {
            return None;
        }
        let parent = self.path.parent().unwrap_or_else(|| Path::new(""));
        Some(parent.join(paths::companion_folder_name(&self.name())))
    }
}

/// A classified note found while scanning. Rebuilt on every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveItem {
    pub path: PathBuf,

    #[serde(rename = "type")]
    pub para_type: ParaType,
}

impl ArchiveItem {
    pub fn name(&self) -> String {
        paths::note_name(&self.path)
    }

    pub fn into_item(self) -> ParaItem {
        ParaItem::new(self.path, self.para_type)
    }
}

/// Result of classifying a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub para_type: Option<ParaType>,
    pub archived: bool,
}
