//! Creates new project, area and resource notes from their templates.

use crate::config::ParaConfig;
use crate::error::{ParaError, Result};
use crate::model::{ParaItem, ParaType};
use crate::paths;
use crate::scanner::{self, ScanOptions};
use crate::storage::{Frontmatter, VaultStore};
use crate::templates;
use crate::validation;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub para_type: ParaType,
    pub name: String,
    /// Area a project belongs to. Ignored for areas and resources.
    pub area: Option<String>,
}

impl CreateRequest {
    pub fn new(para_type: ParaType, name: impl Into<String>) -> Self {
        Self {
            para_type,
            name: name.into(),
            area: None,
        }
    }

    pub fn with_area(mut self, area: Option<String>) -> Self {
        self.area = area;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreateOutcome {
    Created {
        item: ParaItem,
        #[serde(skip_serializing_if = "Option::is_none")]
        companion_folder: Option<PathBuf>,
    },
    /// A note with the same name already exists; nothing was written.
    Existing { item: ParaItem },
}

impl CreateOutcome {
    pub fn item(&self) -> &ParaItem {
        match self {
            CreateOutcome::Created { item, .. } | CreateOutcome::Existing { item } => item,
        }
    }
}

/// Where a new note named `name` goes.
pub fn destination(config: &ParaConfig, para_type: ParaType, name: &str) -> PathBuf {
    let root = config.folders.root_for(para_type);
    let file = paths::markdown_file(name);
    if para_type == ParaType::Project && config.folders.use_folder_structure {
        root.join(name).join(file)
    } else {
        root.join(file)
    }
}

pub fn create_item<S: VaultStore>(
    store: &S,
    config: &ParaConfig,
    request: &CreateRequest,
) -> Result<CreateOutcome> {
    let para_type = request.para_type;
    let name = validation::validate_name(&request.name)?;
    let area = match request.area.as_deref().map(str::trim) {
        Some(area) if !area.is_empty() && para_type == ParaType::Project => {
            Some(validation::validate_name(area)?)
        }
        _ => None,
    };

    if let Some(existing) = find_existing(store, config, para_type, &name)? {
        tracing::info!(
            path = %paths::display(&existing),
            "{} '{}' already exists",
            para_type.label(),
            name
        );
        return Ok(CreateOutcome::Existing {
            item: ParaItem::new(existing, para_type),
        });
    }

    let template_path = config.templates.path_for(para_type);
    if !store.file_exists(&template_path) {
        return Err(ParaError::Precondition(format!(
            "The template '{}' does not exist!",
            paths::display(&template_path)
        )));
    }
    let template = store.read_content(&template_path)?;
    let content = render_note(&template, para_type, area.as_deref())?;

    let path = destination(config, para_type, &name);
    if let Some(parent) = path.parent() {
        store.create_folder(parent)?;
    }
    store.write_content(&path, &content)?;
    tracing::info!(
        path = %paths::display(&path),
        area = area.as_deref().unwrap_or(""),
        "Created {}",
        para_type
    );

    let mut companion_folder = None;
    let item = ParaItem::new(path, para_type);
    if config.folders.use_companion_dir {
        if let Some(folder) = item.companion_folder() {
            if !store.folder_exists(&folder) {
                store.create_folder(&folder)?;
                tracing::debug!(folder = %paths::display(&folder), "Created companion folder");
            }
            companion_folder = Some(folder);
        }
    }

    Ok(CreateOutcome::Created {
        item,
        companion_folder,
    })
}

/// Template text with the area link filled and the type and area tags set.
fn render_note(template: &str, para_type: ParaType, area: Option<&str>) -> Result<String> {
    let content = templates::instantiate(template, area);
    let (mut frontmatter, body) = Frontmatter::parse(&content)?;
    let mut changed = frontmatter.add_tag(para_type.tag());
    if let Some(area) = area {
        changed |= frontmatter.add_tag(&area.to_lowercase());
    }
    if !changed {
        return Ok(content);
    }
    frontmatter.render(body)
}

/// An existing note with the same name, compared case-insensitively. Projects
/// are also looked up in the archive so a name is never reused.
fn find_existing<S: VaultStore>(
    store: &S,
    config: &ParaConfig,
    para_type: ParaType,
    name: &str,
) -> Result<Option<PathBuf>> {
    let wanted = name.to_lowercase();
    let root = config.folders.root_for(para_type);
    if let Some(found) = find_in_root(store, &root, &wanted)? {
        return Ok(Some(found));
    }

    if para_type == ParaType::Project {
        let options = ScanOptions::new(config.folders.archive_root()).with_type(ParaType::Project);
        let archived = scanner::scan(store, &options)?;
        if let Some(item) = archived
            .into_iter()
            .find(|item| item.name().to_lowercase() == wanted)
        {
            return Ok(Some(item.path));
        }
    }

    Ok(None)
}

/// `wanted` is the lowercased note name.
fn find_in_root<S: VaultStore>(store: &S, root: &Path, wanted: &str) -> Result<Option<PathBuf>> {
    if !store.folder_exists(root) {
        return Ok(None);
    }
    for entry in store.list_children(root)? {
        if entry.is_file()
            && paths::is_markdown(&entry.path)
            && paths::note_name(&entry.path).to_lowercase() == wanted
        {
            return Ok(Some(entry.path));
        }
        if entry.is_folder() && entry.name().to_lowercase() == wanted {
            let note = entry.path.join(paths::markdown_file(&entry.name()));
            return Ok(Some(if store.file_exists(&note) {
                note
            } else {
                entry.path
            }));
        }
    }
    Ok(None)
}
