use crate::error::{ParaError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParaType {
    Project,
    Area,
    Resource,
}

/// Order in which type tags are checked when a note carries more than one.
/// The first match wins.
pub const CLASSIFICATION_ORDER: [ParaType; 3] =
    [ParaType::Project, ParaType::Resource, ParaType::Area];

impl ParaType {
    /// Front matter tag marking a note as this type.
    pub fn tag(self) -> &'static str {
        match self {
            ParaType::Project => "project",
            ParaType::Area => "area",
            ParaType::Resource => "resource",
        }
    }

    /// Capitalized label for user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            ParaType::Project => "Project",
            ParaType::Area => "Area",
            ParaType::Resource => "Resource",
        }
    }
}

impl fmt::Display for ParaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ParaType {
    type Err = ParaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('#').to_lowercase().as_str() {
            "project" => Ok(ParaType::Project),
            "area" => Ok(ParaType::Area),
            "resource" => Ok(ParaType::Resource),
            _ => Err(ParaError::Parse(format!("Invalid PARA type: {}", s))),
        }
    }
}

/// Workflow state written to a project's `Status::` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Pending,
    Aborted,
    Done,
}

impl ProjectStatus {
    /// The full status line, e.g. `Status:: #done`.
    pub fn line(self) -> String {
        format!("Status:: #{}", self)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Draft => write!(f, "draft"),
            ProjectStatus::Pending => write!(f, "pending"),
            ProjectStatus::Aborted => write!(f, "aborted"),
            ProjectStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ParaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('#').to_lowercase().as_str() {
            "draft" => Ok(ProjectStatus::Draft),
            "pending" => Ok(ProjectStatus::Pending),
            "aborted" => Ok(ProjectStatus::Aborted),
            "done" => Ok(ProjectStatus::Done),
            _ => Err(ParaError::Parse(format!("Invalid project status: {}", s))),
        }
    }
}
