use crate::error::{ParaError, Result};
use crate::paths;
use crate::storage::{Frontmatter, VaultStore};
use std::path::{Path, PathBuf};

/// A completed step of a transition, with what is needed to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// File text was replaced - undo by writing the previous text back
    Rewrite { path: PathBuf, previous: String },
    /// A file or folder was moved - undo by moving it back
    Move { from: PathBuf, to: PathBuf },
    /// A folder was created - undo by removing it if still empty
    CreateFolder { path: PathBuf },
}

impl Step {
    pub fn description(&self) -> String {
        match self {
            Step::Rewrite { path, .. } => format!("rewrite {}", paths::display(path)),
            Step::Move { from, to } => {
                format!("move {} -> {}", paths::display(from), paths::display(to))
            }
            Step::CreateFolder { path } => format!("create folder {}", paths::display(path)),
        }
    }
}

/// Runs the mutations of one transition against a store and remembers each
/// completed step so a failure part-way can be reversed.
pub struct Journal<'a, S: VaultStore> {
    store: &'a S,
    operation: String,
    steps: Vec<Step>,
}

impl<'a, S: VaultStore> Journal<'a, S> {
    pub fn begin(store: &'a S, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        tracing::debug!(operation = %operation, "Transition started");
        Self {
            store,
            operation,
            steps: Vec::new(),
        }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn rewrite_content<F>(&mut self, path: &Path, f: F) -> Result<()>
    where
        F: FnOnce(&str) -> String,
    {
        let previous = self.store.rewrite_content(path, f)?;
        self.record(Step::Rewrite {
            path: path.to_path_buf(),
            previous,
        });
        Ok(())
    }

    pub fn mutate_metadata<F>(&mut self, path: &Path, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frontmatter),
    {
        let previous = self.store.mutate_metadata(path, f)?;
        self.record(Step::Rewrite {
            path: path.to_path_buf(),
            previous,
        });
        Ok(())
    }

    pub fn rename(&mut self, from: &Path, to: &Path) -> Result<()> {
        self.store.rename(from, to)?;
        self.record(Step::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }

    /// Create `path` unless it already exists.
    pub fn ensure_folder(&mut self, path: &Path) -> Result<()> {
        if self.store.folder_exists(path) {
            return Ok(());
        }
        self.store.create_folder(path)?;
        self.record(Step::CreateFolder {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn record(&mut self, step: Step) {
        tracing::debug!(operation = %self.operation, step = %step.description(), "Step done");
        self.steps.push(step);
    }

    /// Keep every step.
    pub fn commit(self) {
        tracing::debug!(
            operation = %self.operation,
            steps = self.steps.len(),
            "Transition committed"
        );
    }

    /// Reverse every recorded step, newest first.
    pub fn rollback(self) -> Result<()> {
        for step in self.steps.into_iter().rev() {
            let description = step.description();
            let undone = match step {
                Step::Rewrite { path, previous } => self.store.write_content(&path, &previous),
                Step::Move { from, to } => self.store.rename(&to, &from),
                Step::CreateFolder { path } => {
                    let empty = self
                        .store
                        .list_children(&path)
                        .map(|c| c.is_empty())
                        .unwrap_or(false);
                    if empty {
                        self.store.delete(&path, false)
                    } else {
                        Ok(())
                    }
                }
            };
            if let Err(e) = undone {
                return Err(ParaError::Storage(format!(
                    "could not undo {}: {}",
                    description, e
                )));
            }
            tracing::debug!(operation = %self.operation, step = %description, "Step undone");
        }
        Ok(())
    }

    /// Commit on success. On failure roll back and return the original
    /// error, or [`ParaError::ManualRecovery`] if the rollback also failed.
    pub fn finish<T>(self, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                self.commit();
                Ok(value)
            }
            Err(cause) => {
                let operation = self.operation.clone();
                let performed = self.steps.len();
                match self.rollback() {
                    Ok(()) => {
                        if performed > 0 {
                            tracing::warn!(
                                operation = %operation,
                                steps = performed,
                                error = %cause,
                                "Transition failed, completed steps were rolled back"
                            );
                        }
                        Err(cause)
                    }
                    Err(rollback) => {
                        tracing::error!(
                            operation = %operation,
                            error = %cause,
                            rollback_error = %rollback,
                            "Transition failed and rollback failed; manual recovery required"
                        );
                        Err(ParaError::ManualRecovery {
                            operation,
                            cause: cause.to_string(),
                            rollback: rollback.to_string(),
                        })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsVault;
    use tempfile::TempDir;

    fn setup_vault() -> (FsVault, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let vault = FsVault::new(temp_dir.path());
        vault
            .write_content(Path::new("1-Projects/Launch.md"), "Status:: #draft\n")
            .unwrap();
        (vault, temp_dir)
    }

    #[test]
    fn test_rollback_reverses_steps_in_order() {
        let (vault, _temp_dir) = setup_vault();
        let mut journal = Journal::begin(&vault, "archive");

        journal
            .rewrite_content(Path::new("1-Projects/Launch.md"), |_| {
                "Status:: #aborted\n".to_string()
            })
            .unwrap();
        journal.ensure_folder(Path::new("4-Archive")).unwrap();
        journal
            .rename(Path::new("1-Projects/Launch.md"), Path::new("4-Archive/Launch.md"))
            .unwrap();
        assert_eq!(journal.steps().len(), 3);

        journal.rollback().unwrap();

        assert_eq!(
            vault.read_content(Path::new("1-Projects/Launch.md")).unwrap(),
            "Status:: #draft\n"
        );
        assert!(!vault.exists(Path::new("4-Archive/Launch.md")));
        assert!(!vault.folder_exists(Path::new("4-Archive")));
    }

    #[test]
    fn test_ensure_existing_folder_is_not_recorded() {
        let (vault, _temp_dir) = setup_vault();
        let mut journal = Journal::begin(&vault, "archive");
        journal.ensure_folder(Path::new("1-Projects")).unwrap();
        assert!(journal.steps().is_empty());
    }

    #[test]
    fn test_finish_rolls_back_on_error() {
        let (vault, _temp_dir) = setup_vault();
        let mut journal = Journal::begin(&vault, "complete");
        let outcome = (|| {
            journal.rewrite_content(Path::new("1-Projects/Launch.md"), |_| "changed".to_string())?;
            journal.rename(Path::new("1-Projects/Missing.md"), Path::new("4-Archive/Missing.md"))
        })();

        let err = journal.finish(outcome).unwrap_err();
        assert!(matches!(err, ParaError::NotFound(_)));
        assert_eq!(
            vault.read_content(Path::new("1-Projects/Launch.md")).unwrap(),
            "Status:: #draft\n"
        );
    }

    #[test]
    fn test_finish_reports_manual_recovery_when_undo_fails() {
        let (vault, _temp_dir) = setup_vault();
        let mut journal = Journal::begin(&vault, "archive");
        journal
            .rename(Path::new("1-Projects/Launch.md"), Path::new("4-Archive/Launch.md"))
            .unwrap();
        // Something else takes the original spot, so the move cannot be undone
        vault
            .write_content(Path::new("1-Projects/Launch.md"), "other")
            .unwrap();

        let err = journal
            .finish::<()>(Err(ParaError::Storage("boom".to_string())))
            .unwrap_err();
        match err {
            ParaError::ManualRecovery {
                operation, cause, ..
            } => {
                assert_eq!(operation, "archive");
                assert!(cause.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
