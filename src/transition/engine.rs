use super::journal::{Journal, Step};
use crate::classifier;
use crate::config::FolderSettings;
use crate::error::{ParaError, Result};
use crate::model::{ParaItem, ParaType, ProjectStatus};
use crate::paths;
use crate::status;
use crate::storage::VaultStore;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const COMPLETED_KEY: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Archive,
    Restore,
    Complete,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Archive => write!(f, "archive"),
            Transition::Restore => write!(f, "restore"),
            Transition::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// What a transition did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionReport {
    pub transition: Transition,

    #[serde(rename = "type")]
    pub para_type: ParaType,

    /// Note path before the transition.
    pub from: PathBuf,

    /// Note path after the transition.
    pub to: PathBuf,

    /// Every file or folder moved, in order.
    pub moved: Vec<MovedEntry>,

    /// Status written to the project's status line, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TransitionReport {
    pub fn name(&self) -> String {
        paths::note_name(&self.to)
    }
}

/// The lifecycle state machine: archive, restore and complete.
///
/// Every transition checks its preconditions and destination collisions
/// before touching the vault, then runs its steps in a [`Journal`] so a
/// failure part-way is rolled back.
pub struct TransitionEngine<'a, S: VaultStore> {
    store: &'a S,
    folders: &'a FolderSettings,
}

impl<'a, S: VaultStore> TransitionEngine<'a, S> {
    pub fn new(store: &'a S, folders: &'a FolderSettings) -> Self {
        Self { store, folders }
    }

    /// Move an active project, area or resource into the archive.
    ///
    /// The note's type comes from the root folder it lives in and must match
    /// one of its tags.
    pub fn archive(&self, path: &Path) -> Result<TransitionReport> {
        let path = paths::normalize(path);
        self.require_file(&path)?;

        if classifier::is_archived(&path, self.folders) {
            return Err(ParaError::Precondition(format!(
                "'{}' is already archived",
                paths::note_name(&path)
            )));
        }
        let Some(para_type) = classifier::active_root_type(&path, self.folders) else {
            return Err(ParaError::Precondition(format!(
                "'{}' is not inside the projects, areas or resources folder",
                paths::display(&path)
            )));
        };
        let frontmatter = self.store.read_metadata(&path)?;
        if !frontmatter.has_tag(para_type.tag()) {
            return Err(ParaError::Precondition(format!(
                "File has no tag '{}'",
                para_type.tag()
            )));
        }

        tracing::info!(path = %paths::display(&path), "Archiving {}", para_type);
        match para_type {
            ParaType::Project => self.archive_project(&path),
            ParaType::Area => self.archive_area(&path),
            ParaType::Resource => self.archive_resource(&path),
        }
    }

    /// Move an archived note back to the root folder of its type, which is
    /// read from its tags.
    pub fn restore(&self, path: &Path) -> Result<TransitionReport> {
        let path = paths::normalize(path);
        self.require_file(&path)?;
        self.require_archived(&path)?;

        let classification = classifier::classify(self.store, &path, self.folders)?;
        let Some(para_type) = classification.para_type else {
            return Err(ParaError::Precondition(
                "File is not a known PARA type".to_string(),
            ));
        };
        self.restore_as(&path, para_type)
    }

    /// Restore an item picked from an archive scan, trusting its scanned type.
    pub fn restore_item(&self, item: &ParaItem) -> Result<TransitionReport> {
        let path = paths::normalize(&item.path);
        self.require_file(&path)?;
        self.require_archived(&path)?;
        self.restore_as(&path, item.para_type)
    }

    /// Mark an active project completed and move it into the archive.
    pub fn complete(&self, path: &Path) -> Result<TransitionReport> {
        let path = paths::normalize(path);
        self.require_file(&path)?;

        let projects = self.folders.projects_root();
        let in_projects = paths::is_within(&path, &projects);
        let tagged = self
            .store
            .read_metadata(&path)?
            .has_tag(ParaType::Project.tag());
        if classifier::is_archived(&path, self.folders) || !(in_projects || tagged) {
            return Err(ParaError::Precondition(
                "File is not an active project".to_string(),
            ));
        }

        let (source, dest) = self.plan_move(&path, &projects, &self.folders.archive_root());
        self.require_free(&dest)?;

        tracing::info!(path = %paths::display(&path), "Completing project");
        let archive = self.folders.archive_root();
        let (found, moved) = self.run(Transition::Complete, &path, |journal| {
            journal.mutate_metadata(&path, |fm| fm.set_bool(COMPLETED_KEY, true))?;
            let found = rewrite_status(journal, &path, ProjectStatus::Done)?;
            journal.ensure_folder(&archive)?;
            journal.rename(&source, &dest)?;
            Ok(found)
        })?;

        Ok(self.report(
            Transition::Complete,
            ParaType::Project,
            &path,
            relocate(&path, &source, &dest),
            moved,
            Some((ProjectStatus::Done, found)),
        ))
    }

    fn archive_project(&self, path: &Path) -> Result<TransitionReport> {
        let archive = self.folders.archive_root();
        let (source, dest) = self.plan_move(path, &self.folders.projects_root(), &archive);
        self.require_free(&dest)?;

        let (found, moved) = self.run(Transition::Archive, path, |journal| {
            let found = rewrite_status(journal, path, ProjectStatus::Aborted)?;
            journal.ensure_folder(&archive)?;
            journal.rename(&source, &dest)?;
            Ok(found)
        })?;

        Ok(self.report(
            Transition::Archive,
            ParaType::Project,
            path,
            relocate(path, &source, &dest),
            moved,
            Some((ProjectStatus::Aborted, found)),
        ))
    }

    /// The area note and its companion folder go into a wrapper folder named
    /// after the area: `<archive>/<Area>/<Area>.md` and `<archive>/<Area>/_<area>/`.
    fn archive_area(&self, path: &Path) -> Result<TransitionReport> {
        let item = ParaItem::new(path, ParaType::Area);
        let wrapper = self.folders.archive_root().join(item.name());
        self.require_free(&wrapper)?;

        let dest = wrapper.join(paths::entry_name(path));
        let companion = item
            .companion_folder()
            .filter(|folder| self.store.folder_exists(folder));

        let ((), moved) = self.run(Transition::Archive, path, |journal| {
            journal.ensure_folder(&wrapper)?;
            journal.rename(path, &dest)?;
            if let Some(folder) = &companion {
                journal.rename(folder, &wrapper.join(paths::entry_name(folder)))?;
            }
            Ok(())
        })?;

        Ok(self.report(Transition::Archive, ParaType::Area, path, dest, moved, None))
    }

    fn archive_resource(&self, path: &Path) -> Result<TransitionReport> {
        let archive = self.folders.archive_root();
        let dest = archive.join(paths::entry_name(path));
        self.require_free(&dest)?;

        let ((), moved) = self.run(Transition::Archive, path, |journal| {
            journal.ensure_folder(&archive)?;
            journal.rename(path, &dest)
        })?;

        Ok(self.report(Transition::Archive, ParaType::Resource, path, dest, moved, None))
    }

    fn restore_as(&self, path: &Path, para_type: ParaType) -> Result<TransitionReport> {
        tracing::info!(path = %paths::display(path), "Restoring {}", para_type);
        match para_type {
            ParaType::Project => self.restore_project(path),
            ParaType::Area => self.restore_area(path),
            ParaType::Resource => self.restore_resource(path),
        }
    }

    fn restore_project(&self, path: &Path) -> Result<TransitionReport> {
        let projects = self.folders.projects_root();
        let (source, dest) = self.plan_move(path, &self.folders.archive_root(), &projects);
        self.require_free(&dest)?;

        let (found, moved) = self.run(Transition::Restore, path, |journal| {
            let found = rewrite_status(journal, path, ProjectStatus::Pending)?;
            journal.ensure_folder(&projects)?;
            journal.rename(&source, &dest)?;
            Ok(found)
        })?;

        Ok(self.report(
            Transition::Restore,
            ParaType::Project,
            path,
            relocate(path, &source, &dest),
            moved,
            Some((ProjectStatus::Pending, found)),
        ))
    }

    /// Moves the note and its companion folder back to the areas root, then
    /// removes the archive wrapper folder once it is empty.
    fn restore_area(&self, path: &Path) -> Result<TransitionReport> {
        let areas = self.folders.areas_root();
        let archive = self.folders.archive_root();
        let item = ParaItem::new(path, ParaType::Area);

        let dest = areas.join(paths::entry_name(path));
        self.require_free(&dest)?;
        let companion = item
            .companion_folder()
            .filter(|folder| self.store.folder_exists(folder));
        let companion_dest = companion
            .as_ref()
            .map(|folder| areas.join(paths::entry_name(folder)));
        if let Some(companion_dest) = &companion_dest {
            self.require_free(companion_dest)?;
        }

        let ((), moved) = self.run(Transition::Restore, path, |journal| {
            journal.ensure_folder(&areas)?;
            journal.rename(path, &dest)?;
            if let (Some(folder), Some(folder_dest)) = (&companion, &companion_dest) {
                journal.rename(folder, folder_dest)?;
            }
            Ok(())
        })?;

        let mut report = self.report(Transition::Restore, ParaType::Area, path, dest, moved, None);
        if let Some(wrapper) = path.parent() {
            if paths::is_within(wrapper, &archive) && paths::normalize(wrapper) != archive {
                if let Some(warning) = self.remove_empty_wrapper(wrapper) {
                    report.warnings.push(warning);
                }
            }
        }
        Ok(report)
    }

    fn restore_resource(&self, path: &Path) -> Result<TransitionReport> {
        let resources = self.folders.resources_root();
        let dest = resources.join(paths::entry_name(path));
        self.require_free(&dest)?;

        let ((), moved) = self.run(Transition::Restore, path, |journal| {
            journal.ensure_folder(&resources)?;
            journal.rename(path, &dest)
        })?;

        Ok(self.report(Transition::Restore, ParaType::Resource, path, dest, moved, None))
    }

    /// Delete the emptied archive wrapper of a restored area. Returns a
    /// warning when the folder has to stay.
    fn remove_empty_wrapper(&self, wrapper: &Path) -> Option<String> {
        let children = match self.store.list_children(wrapper) {
            Ok(children) => children,
            Err(e) => return Some(format!("could not inspect '{}': {}", paths::display(wrapper), e)),
        };
        if !children.is_empty() {
            tracing::warn!(
                folder = %paths::display(wrapper),
                remaining = children.len(),
                "Archive folder is not empty, keeping it"
            );
            return Some(format!(
                "'{}' still holds {} item(s) and was kept",
                paths::display(wrapper),
                children.len()
            ));
        }
        match self.store.delete(wrapper, false) {
            Ok(()) => {
                tracing::debug!(folder = %paths::display(wrapper), "Removed empty archive folder");
                None
            }
            Err(e) => Some(format!("could not remove '{}': {}", paths::display(wrapper), e)),
        }
    }

    /// What to move from `from_root` to `to_root`: the note's immediate parent
    /// folder when that folder sits below `from_root`, the note file otherwise.
    fn plan_move(&self, path: &Path, from_root: &Path, to_root: &Path) -> (PathBuf, PathBuf) {
        match paths::owning_folder(path, from_root) {
            Some(folder) => {
                let dest = to_root.join(paths::entry_name(&folder));
                (folder, dest)
            }
            None => (path.to_path_buf(), to_root.join(paths::entry_name(path))),
        }
    }

    fn run<T, F>(&self, transition: Transition, path: &Path, f: F) -> Result<(T, Vec<MovedEntry>)>
    where
        F: FnOnce(&mut Journal<'a, S>) -> Result<T>,
    {
        let operation = format!("{} '{}'", transition, paths::display(path));
        let mut journal = Journal::begin(self.store, operation);
        let outcome = f(&mut journal);
        let moved = moved_entries(journal.steps());
        journal.finish(outcome).map(|value| (value, moved))
    }

    fn report(
        &self,
        transition: Transition,
        para_type: ParaType,
        from: &Path,
        to: PathBuf,
        moved: Vec<MovedEntry>,
        status: Option<(ProjectStatus, bool)>,
    ) -> TransitionReport {
        let mut warnings = Vec::new();
        if let Some((written, false)) = status {
            tracing::warn!(
                path = %paths::display(from),
                status = %written,
                "No status line found, status left unchanged"
            );
            warnings.push(format!(
                "no 'Status::' line found, status not set to #{}",
                written
            ));
        }
        tracing::info!(
            from = %paths::display(from),
            to = %paths::display(&to),
            "{} {} done",
            para_type.label(),
            transition
        );
        TransitionReport {
            transition,
            para_type,
            from: from.to_path_buf(),
            to,
            moved,
            status: status.and_then(|(written, found)| found.then_some(written)),
            warnings,
        }
    }

    fn require_file(&self, path: &Path) -> Result<()> {
        if self.store.file_exists(path) {
            Ok(())
        } else {
            Err(ParaError::NotFound(paths::display(path)))
        }
    }

    fn require_archived(&self, path: &Path) -> Result<()> {
        if classifier::is_archived(path, self.folders) {
            Ok(())
        } else {
            Err(ParaError::Precondition(
                "Cannot restore: current item is not archived".to_string(),
            ))
        }
    }

    fn require_free(&self, dest: &Path) -> Result<()> {
        if self.store.exists(dest) {
            Err(ParaError::AlreadyExists(paths::display(dest)))
        } else {
            Ok(())
        }
    }
}

/// Rewrite the status line; returns whether one was found.
fn rewrite_status<S: VaultStore>(
    journal: &mut Journal<'_, S>,
    path: &Path,
    status: ProjectStatus,
) -> Result<bool> {
    let mut found = false;
    journal.rewrite_content(path, |content| {
        let rewrite = status::rewrite_status(content, status);
        found = rewrite.found;
        rewrite.content
    })?;
    Ok(found)
}

/// New location of `path` after `source` moved to `dest`.
fn relocate(path: &Path, source: &Path, dest: &Path) -> PathBuf {
    match path.strip_prefix(source) {
        Ok(rest) if !rest.as_os_str().is_empty() => dest.join(rest),
        _ => dest.to_path_buf(),
    }
}

fn moved_entries(steps: &[Step]) -> Vec<MovedEntry> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Move { from, to } => Some(MovedEntry {
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParaConfig;
    use crate::storage::{Entry, FsVault};
    use tempfile::TempDir;

    const PROJECT: &str = "---\ntags:\n- project\ncompleted: false\n---\nArea:: [[Marketing]]\nStatus:: #draft\n\n## Tasks\n";
    const AREA: &str = "---\ntags:\n- area\n---\nWhat is this area about?\n";
    const RESOURCE: &str = "---\ntags:\n- resource\n---\n";

    fn setup() -> (FsVault, ParaConfig, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let vault = FsVault::new(temp_dir.path());
        (vault, ParaConfig::default(), temp_dir)
    }

    fn write(vault: &FsVault, path: &str, content: &str) {
        vault.write_content(Path::new(path), content).unwrap();
    }

    fn read(vault: &FsVault, path: &str) -> String {
        vault.read_content(Path::new(path)).unwrap()
    }

    #[test]
    fn test_archive_project_aborts_and_moves() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Launch.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.archive(Path::new("1-Projects/Launch.md")).unwrap();

        assert_eq!(report.para_type, ParaType::Project);
        assert_eq!(report.to, PathBuf::from("4-Archive/Launch.md"));
        assert_eq!(report.status, Some(ProjectStatus::Aborted));
        assert!(report.warnings.is_empty());
        assert!(!vault.exists(Path::new("1-Projects/Launch.md")));
        let content = read(&vault, "4-Archive/Launch.md");
        assert!(content.contains("Status:: #aborted"));
        assert!(content.contains("Area:: [[Marketing]]"));
    }

    #[test]
    fn test_complete_project_marks_done() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Launch.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.complete(Path::new("1-Projects/Launch.md")).unwrap();

        assert_eq!(report.transition, Transition::Complete);
        assert_eq!(report.status, Some(ProjectStatus::Done));
        let archived = Path::new("4-Archive/Launch.md");
        assert!(read(&vault, "4-Archive/Launch.md").contains("Status:: #done"));
        assert_eq!(
            vault.read_metadata(archived).unwrap().get_bool("completed"),
            Some(true)
        );
    }

    #[test]
    fn test_restore_project_sets_pending() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Launch.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        engine.archive(Path::new("1-Projects/Launch.md")).unwrap();
        let report = engine.restore(Path::new("4-Archive/Launch.md")).unwrap();

        assert_eq!(report.to, PathBuf::from("1-Projects/Launch.md"));
        assert!(read(&vault, "1-Projects/Launch.md").contains("Status:: #pending"));
        assert!(!vault.exists(Path::new("4-Archive/Launch.md")));
    }

    #[test]
    fn test_project_folder_moves_as_a_whole() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Website/Website.md", PROJECT);
        write(&vault, "1-Projects/Website/Sitemap.md", "pages\n");
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine
            .complete(Path::new("1-Projects/Website/Website.md"))
            .unwrap();

        assert_eq!(report.to, PathBuf::from("4-Archive/Website/Website.md"));
        assert_eq!(
            report.moved,
            vec![MovedEntry {
                from: PathBuf::from("1-Projects/Website"),
                to: PathBuf::from("4-Archive/Website"),
            }]
        );
        assert!(vault.file_exists(Path::new("4-Archive/Website/Sitemap.md")));
        assert!(!vault.exists(Path::new("1-Projects/Website")));

        engine
            .restore(Path::new("4-Archive/Website/Website.md"))
            .unwrap();
        assert!(vault.file_exists(Path::new("1-Projects/Website/Sitemap.md")));
        assert!(read(&vault, "1-Projects/Website/Website.md").contains("Status:: #pending"));
    }

    #[test]
    fn test_grouped_project_archive_leaves_siblings() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Client/Launch/Launch.md", PROJECT);
        write(&vault, "1-Projects/Client/Rebrand/Rebrand.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine
            .archive(Path::new("1-Projects/Client/Launch/Launch.md"))
            .unwrap();

        assert_eq!(
            report.moved,
            vec![MovedEntry {
                from: PathBuf::from("1-Projects/Client/Launch"),
                to: PathBuf::from("4-Archive/Launch"),
            }]
        );
        assert_eq!(report.to, PathBuf::from("4-Archive/Launch/Launch.md"));
        assert_eq!(read(&vault, "1-Projects/Client/Rebrand/Rebrand.md"), PROJECT);
        assert!(!vault.exists(Path::new("4-Archive/Client")));
    }

    #[test]
    fn test_grouped_project_complete_leaves_siblings() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Client/Launch/Launch.md", PROJECT);
        write(&vault, "1-Projects/Client/Rebrand/Rebrand.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine
            .complete(Path::new("1-Projects/Client/Launch/Launch.md"))
            .unwrap();

        assert_eq!(report.to, PathBuf::from("4-Archive/Launch/Launch.md"));
        assert!(read(&vault, "4-Archive/Launch/Launch.md").contains("Status:: #done"));
        assert!(vault.file_exists(Path::new("1-Projects/Client/Rebrand/Rebrand.md")));
    }

    #[test]
    fn test_grouped_project_restore_leaves_siblings() {
        let (vault, config, _temp_dir) = setup();
        let archived = PROJECT.replace("#draft", "#aborted");
        write(&vault, "4-Archive/2024/Launch/Launch.md", &archived);
        write(&vault, "4-Archive/2024/Old.md", &archived);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine
            .restore(Path::new("4-Archive/2024/Launch/Launch.md"))
            .unwrap();

        assert_eq!(
            report.moved,
            vec![MovedEntry {
                from: PathBuf::from("4-Archive/2024/Launch"),
                to: PathBuf::from("1-Projects/Launch"),
            }]
        );
        assert!(read(&vault, "1-Projects/Launch/Launch.md").contains("Status:: #pending"));
        assert_eq!(read(&vault, "4-Archive/2024/Old.md"), archived);
        assert!(!vault.exists(Path::new("1-Projects/2024")));
    }

    #[test]
    fn test_area_round_trip_with_companion_folder() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "2-Areas/Health.md", AREA);
        write(&vault, "2-Areas/_health/Workout Log.md", "squats\n");
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.archive(Path::new("2-Areas/Health.md")).unwrap();
        assert_eq!(report.to, PathBuf::from("4-Archive/Health/Health.md"));
        assert_eq!(report.moved.len(), 2);
        assert!(vault.file_exists(Path::new("4-Archive/Health/_health/Workout Log.md")));
        assert!(!vault.exists(Path::new("2-Areas/_health")));

        let report = engine.restore(Path::new("4-Archive/Health/Health.md")).unwrap();
        assert_eq!(report.to, PathBuf::from("2-Areas/Health.md"));
        assert!(report.warnings.is_empty());
        assert!(vault.file_exists(Path::new("2-Areas/_health/Workout Log.md")));
        assert!(!vault.exists(Path::new("4-Archive/Health")));
        assert!(vault.folder_exists(Path::new("4-Archive")));
    }

    #[test]
    fn test_area_without_companion_folder() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "2-Areas/Finance.md", AREA);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.archive(Path::new("2-Areas/Finance.md")).unwrap();
        assert_eq!(report.moved.len(), 1);
        assert!(vault.file_exists(Path::new("4-Archive/Finance/Finance.md")));
    }

    #[test]
    fn test_area_restore_keeps_non_empty_wrapper() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "4-Archive/Health/Health.md", AREA);
        write(&vault, "4-Archive/Health/stray.md", "left behind\n");
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.restore(Path::new("4-Archive/Health/Health.md")).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(vault.file_exists(Path::new("4-Archive/Health/stray.md")));
        assert!(vault.file_exists(Path::new("2-Areas/Health.md")));
    }

    #[test]
    fn test_area_restore_never_deletes_archive_root() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "4-Archive/Health.md", AREA);
        let engine = TransitionEngine::new(&vault, &config.folders);

        engine.restore(Path::new("4-Archive/Health.md")).unwrap();

        assert!(vault.folder_exists(Path::new("4-Archive")));
        assert!(vault.file_exists(Path::new("2-Areas/Health.md")));
    }

    #[test]
    fn test_resource_round_trip() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "3-Resources/Rust Books.md", RESOURCE);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.archive(Path::new("3-Resources/Rust Books.md")).unwrap();
        assert_eq!(report.status, None);
        assert_eq!(report.to, PathBuf::from("4-Archive/Rust Books.md"));

        let item = ParaItem::new("4-Archive/Rust Books.md", ParaType::Resource);
        let report = engine.restore_item(&item).unwrap();
        assert_eq!(report.to, PathBuf::from("3-Resources/Rust Books.md"));
        assert_eq!(read(&vault, "3-Resources/Rust Books.md"), RESOURCE);
    }

    #[test]
    fn test_archive_requires_matching_tag() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Untagged.md", "Status:: #draft\n");
        let engine = TransitionEngine::new(&vault, &config.folders);

        let err = engine.archive(Path::new("1-Projects/Untagged.md")).unwrap_err();

        assert_eq!(err.to_string(), "File has no tag 'project'");
        assert_eq!(read(&vault, "1-Projects/Untagged.md"), "Status:: #draft\n");
        assert!(!vault.exists(Path::new("4-Archive")));
    }

    #[test]
    fn test_archive_rejects_archived_and_outside_notes() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "4-Archive/Launch.md", PROJECT);
        write(&vault, "Inbox/Launch.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        assert!(engine.archive(Path::new("4-Archive/Launch.md")).unwrap_err().is_rejection());
        assert!(engine.archive(Path::new("Inbox/Launch.md")).unwrap_err().is_rejection());
        assert!(matches!(
            engine.archive(Path::new("1-Projects/Missing.md")),
            Err(ParaError::NotFound(_))
        ));
    }

    #[test]
    fn test_collision_leaves_vault_untouched() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Launch.md", PROJECT);
        write(&vault, "4-Archive/Launch.md", "older launch\n");
        let engine = TransitionEngine::new(&vault, &config.folders);

        let err = engine.archive(Path::new("1-Projects/Launch.md")).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(read(&vault, "1-Projects/Launch.md"), PROJECT);
        assert_eq!(read(&vault, "4-Archive/Launch.md"), "older launch\n");
    }

    #[test]
    fn test_restore_requires_archived_note() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Launch.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let err = engine.restore(Path::new("1-Projects/Launch.md")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot restore: current item is not archived");
    }

    #[test]
    fn test_complete_requires_active_project() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "3-Resources/Rust Books.md", RESOURCE);
        write(&vault, "4-Archive/Launch.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        for path in ["3-Resources/Rust Books.md", "4-Archive/Launch.md"] {
            let err = engine.complete(Path::new(path)).unwrap_err();
            assert_eq!(err.to_string(), "File is not an active project");
        }
        assert_eq!(read(&vault, "4-Archive/Launch.md"), PROJECT);
    }

    #[test]
    fn test_complete_tagged_project_outside_projects_root() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "Inbox/Side/Side.md", PROJECT);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.complete(Path::new("Inbox/Side/Side.md")).unwrap();

        assert_eq!(report.to, PathBuf::from("4-Archive/Side.md"));
        assert!(vault.folder_exists(Path::new("Inbox/Side")));
    }

    #[test]
    fn test_missing_status_line_is_reported() {
        let (vault, config, _temp_dir) = setup();
        let content = "---\ntags:\n- project\n---\nNo status here\n";
        write(&vault, "1-Projects/Quiet.md", content);
        let engine = TransitionEngine::new(&vault, &config.folders);

        let report = engine.archive(Path::new("1-Projects/Quiet.md")).unwrap();

        assert_eq!(report.status, None);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(read(&vault, "4-Archive/Quiet.md"), content);
    }

    /// Store whose moves always fail, to exercise rollback.
    struct NoMoves(FsVault);

    impl VaultStore for NoMoves {
        fn read_content(&self, path: &Path) -> Result<String> {
            self.0.read_content(path)
        }
        fn write_content(&self, path: &Path, content: &str) -> Result<()> {
            self.0.write_content(path, content)
        }
        fn rename(&self, _from: &Path, _to: &Path) -> Result<()> {
            Err(ParaError::Storage("disk full".to_string()))
        }
        fn create_folder(&self, path: &Path) -> Result<()> {
            self.0.create_folder(path)
        }
        fn folder_exists(&self, path: &Path) -> bool {
            self.0.folder_exists(path)
        }
        fn file_exists(&self, path: &Path) -> bool {
            self.0.file_exists(path)
        }
        fn delete(&self, path: &Path, recursive: bool) -> Result<()> {
            self.0.delete(path, recursive)
        }
        fn list_children(&self, folder: &Path) -> Result<Vec<Entry>> {
            self.0.list_children(folder)
        }
    }

    #[test]
    fn test_failed_move_rolls_back_rewrites() {
        let (vault, config, _temp_dir) = setup();
        write(&vault, "1-Projects/Launch.md", PROJECT);
        let store = NoMoves(vault);
        let engine = TransitionEngine::new(&store, &config.folders);

        let err = engine.complete(Path::new("1-Projects/Launch.md")).unwrap_err();

        assert_eq!(err.to_string(), "Storage error: disk full");
        assert_eq!(read(&store.0, "1-Projects/Launch.md"), PROJECT);
        assert!(!store.0.exists(Path::new("4-Archive")));
    }
}
