//! Built-in note templates and vault initialization.

use crate::config::ParaConfig;
use crate::error::Result;
use crate::model::ParaType;
use crate::paths;
use crate::storage::VaultStore;
use serde::Serialize;
use std::path::PathBuf;

/// Placeholder in the project template that receives the area back-link.
pub const AREA_PLACEHOLDER: &str = "Area:: [[]]";

pub const PROJECT_TEMPLATE: &str = r#"---
tags:
  - project
completed: false
deadline:
---
Area:: [[]]
Status:: #draft
___

## Description
> Project description: What is this project about? Goals? Features? Learnings? ...


---

## Tasks
> List of tasks `- [ ] <task>`


---

## Notes
> Notes and documentation on project


---

## Resources
> List of internal resource notes or external resources.

"#;

pub const AREA_TEMPLATE: &str = r#"---
tags:
  - area
---

---

What is this area about?

---

## Files

## Active Projects

## Archived Projects

## Resources

"#;

pub const RESOURCE_TEMPLATE: &str = r#"---
tags:
  - resource
---
"#;

pub fn default_template(para_type: ParaType) -> &'static str {
    match para_type {
        ParaType::Project => PROJECT_TEMPLATE,
        ParaType::Area => AREA_TEMPLATE,
        ParaType::Resource => RESOURCE_TEMPLATE,
    }
}

/// Fill the template's area back-link when an area is given.
pub fn instantiate(template: &str, area: Option<&str>) -> String {
    match area {
        Some(area) => template.replacen(AREA_PLACEHOLDER, &format!("Area:: [[{}]]", area), 1),
        None => template.to_string(),
    }
}

/// What [`initialize_vault`] created. Existing entries are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InitReport {
    pub folders: Vec<PathBuf>,
    pub templates: Vec<PathBuf>,
}

/// Create the four PARA folders and the template notes if missing.
pub fn initialize_vault<S: VaultStore>(store: &S, config: &ParaConfig) -> Result<InitReport> {
    let mut report = InitReport::default();

    let folders = &config.folders;
    let wanted = [
        config.templates.folder_path(),
        folders.projects_root(),
        folders.areas_root(),
        folders.resources_root(),
        folders.archive_root(),
    ];
    for folder in wanted {
        if !store.folder_exists(&folder) {
            store.create_folder(&folder)?;
            tracing::info!(folder = %paths::display(&folder), "Created folder");
            report.folders.push(folder);
        }
    }

    for para_type in [ParaType::Project, ParaType::Area, ParaType::Resource] {
        let path = config.templates.path_for(para_type);
        if store.file_exists(&path) {
            tracing::debug!(template = %paths::display(&path), "Template exists, keeping it");
            continue;
        }
        store.write_content(&path, default_template(para_type))?;
        tracing::info!(template = %paths::display(&path), "Created template");
        report.templates.push(path);
    }

    Ok(report)
}
