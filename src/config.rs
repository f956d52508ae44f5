use crate::error::{ParaError, Result};
use crate::model::ParaType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file placed at the vault root.
pub const CONFIG_FILE: &str = ".para.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParaConfig {
    #[serde(default)]
    pub folders: FolderSettings,

    #[serde(default)]
    pub templates: TemplateSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderSettings {
    #[serde(default = "default_projects_path")]
    pub projects_path: String,

    /// Place each new project in its own `<name>/<name>.md` folder.
    #[serde(default)]
    pub use_folder_structure: bool,

    #[serde(default = "default_areas_path")]
    pub areas_path: String,

    /// Create a `_<area>` companion folder next to each new area.
    #[serde(default = "default_use_companion_dir")]
    pub use_companion_dir: bool,

    #[serde(default = "default_resources_path")]
    pub resources_path: String,

    #[serde(default = "default_archive_path")]
    pub archive_path: String,
}

fn default_projects_path() -> String {
    "1-Projects".to_string()
}

fn default_areas_path() -> String {
    "2-Areas".to_string()
}

fn default_use_companion_dir() -> bool {
    true
}

fn default_resources_path() -> String {
    "3-Resources".to_string()
}

fn default_archive_path() -> String {
    "4-Archive".to_string()
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            projects_path: default_projects_path(),
            use_folder_structure: false,
            areas_path: default_areas_path(),
            use_companion_dir: default_use_companion_dir(),
            resources_path: default_resources_path(),
            archive_path: default_archive_path(),
        }
    }
}

impl FolderSettings {
    pub fn projects_root(&self) -> PathBuf {
        PathBuf::from(&self.projects_path)
    }

    pub fn areas_root(&self) -> PathBuf {
        PathBuf::from(&self.areas_path)
    }

    pub fn resources_root(&self) -> PathBuf {
        PathBuf::from(&self.resources_path)
    }

    pub fn archive_root(&self) -> PathBuf {
        PathBuf::from(&self.archive_path)
    }

    /// Folder where active notes of `para_type` live.
    pub fn root_for(&self, para_type: ParaType) -> PathBuf {
        match para_type {
            ParaType::Project => self.projects_root(),
            ParaType::Area => self.areas_root(),
            ParaType::Resource => self.resources_root(),
        }
    }

    fn validate(&self) -> Result<()> {
        let roots = [
            ("projects_path", &self.projects_path),
            ("areas_path", &self.areas_path),
            ("resources_path", &self.resources_path),
            ("archive_path", &self.archive_path),
        ];
        for (key, value) in roots {
            let trimmed = value.trim_matches('/');
            if trimmed.is_empty() {
                return Err(ParaError::Config(format!("'{}' cannot be empty", key)));
            }
            if Path::new(value.as_str()).is_absolute() || trimmed.split('/').any(|s| s == "..") {
                return Err(ParaError::Config(format!(
                    "'{}' must be a path inside the vault: {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(default = "default_templates_folder")]
    pub folder: String,

    #[serde(default = "default_project_template")]
    pub project: String,

    #[serde(default = "default_area_template")]
    pub area: String,

    #[serde(default = "default_resource_template")]
    pub resource: String,
}

fn default_templates_folder() -> String {
    "Templates".to_string()
}

fn default_project_template() -> String {
    "Project Template".to_string()
}

fn default_area_template() -> String {
    "Area Template".to_string()
}

fn default_resource_template() -> String {
    "Resource Template".to_string()
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            folder: default_templates_folder(),
            project: default_project_template(),
            area: default_area_template(),
            resource: default_resource_template(),
        }
    }
}

impl TemplateSettings {
    pub fn folder_path(&self) -> PathBuf {
        PathBuf::from(&self.folder)
    }

    pub fn name_for(&self, para_type: ParaType) -> &str {
        match para_type {
            ParaType::Project => &self.project,
            ParaType::Area => &self.area,
            ParaType::Resource => &self.resource,
        }
    }

    /// `<folder>/<template name>.md` for `para_type`.
    pub fn path_for(&self, para_type: ParaType) -> PathBuf {
        self.folder_path()
            .join(crate::paths::markdown_file(self.name_for(para_type)))
    }
}

impl ParaConfig {
    /// Load the config by searching upward from `start_path`.
    ///
    /// Returns the config together with the vault root (the directory
    /// holding the config file).
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        let config = Self::load_from(&config_path)?;
        let vault_root = config_path
            .parent()
            .ok_or_else(|| ParaError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, vault_root))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        let config: ParaConfig = toml::from_str(&content)?;
        config.folders.validate()?;
        tracing::debug!(path = %config_path.display(), "Loaded config");
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(ParaError::NotInitialized);
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
