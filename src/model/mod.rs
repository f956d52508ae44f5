//! Data models for PARA notes.
//!
//! - [`ParaType`]: Project, Area or Resource
//! - [`ProjectStatus`]: the workflow state on a project's `Status::` line
//! - [`ParaItem`]: a typed note at a vault path
//! - [`ArchiveItem`]: a note found by a scan
//! - [`Classification`]: detected type plus archived flag

mod item;
mod types;

pub use item::{ArchiveItem, Classification, ParaItem};
pub use types::{CLASSIFICATION_ORDER, ParaType, ProjectStatus};
