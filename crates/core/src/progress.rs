//! Branch-scoped completion tracking.
//!
//! One JSON file per branch under the project's storage directory. Every
//! mutating operation reads the file, applies the change, and persists before
//! returning; there is no in-memory-only mode. Concurrent invocations are not
//! coordinated: the last writer wins, which is acceptable for a single-user
//! local tool.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::vcs;

/// Version string recorded against a prompt when it is completed.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The persisted progress record for one branch.
///
/// `completed` keeps insertion order (completion order); `skipped` is
/// advisory and independent of completion — a prompt may be both, and the
/// two are deliberately never reconciled. Every key in `versions` is also in
/// `completed`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub versions: BTreeMap<String, String>,
}

impl Progress {
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|entry| entry == id)
    }

    #[must_use]
    pub fn is_skipped(&self, id: &str) -> bool {
        self.skipped.iter().any(|entry| entry == id)
    }

    /// First prompt in `run_order` that has not been completed.
    #[must_use]
    pub fn next_pending<'a>(&self, run_order: &'a [String]) -> Option<&'a str> {
        run_order
            .iter()
            .find(|id| !self.is_completed(id))
            .map(String::as_str)
    }
}

/// Reads and writes the branch-scoped progress file.
pub struct ProgressStore {
    dir: PathBuf,
    branch: Option<String>,
}

impl ProgressStore {
    pub fn new(dir: impl Into<PathBuf>, branch: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            branch,
        }
    }

    /// Store scoped to the branch currently checked out in the project.
    ///
    /// Outside version control (or when git fails) the store degrades to a
    /// single unscoped record.
    #[must_use]
    pub fn for_context(context: &Context) -> Self {
        Self::new(
            &context.storage_root,
            vcs::current_branch(&context.project_root),
        )
    }

    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        let file_name = match &self.branch {
            Some(branch) => format!("progress-{}.json", sanitize_branch(branch)),
            None => "progress.json".to_string(),
        };
        self.dir.join(file_name)
    }

    /// The current record; absent or malformed files yield a fresh empty one.
    #[must_use]
    pub fn load(&self) -> Progress {
        let path = self.file_path();
        let Ok(raw) = fs::read_to_string(&path) else {
            return Progress::default();
        };

        match serde_json::from_str(&raw) {
            Ok(progress) => progress,
            Err(e) => {
                debug!("Ignoring malformed progress at `{}`: {e}", path.display());
                Progress::default()
            }
        }
    }

    /// Overwrites the branch-scoped record.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, progress: &Progress) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::io_error("progress", &self.dir, e))?;

        let path = self.file_path();
        let body = serde_json::to_string_pretty(progress)
            .map_err(|e| Error::json_error("writing", "progress", &path, e))?;

        fs::write(&path, body).map_err(|e| Error::io_error("progress", &path, e))
    }

    /// Appends `id` to the completed list and records the tool version.
    ///
    /// Idempotent: a prompt already completed is left untouched, including
    /// its originally recorded version.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn mark_done(&self, id: &str) -> Result<Progress> {
        let mut progress = self.load();

        if !progress.is_completed(id) {
            progress.completed.push(id.to_string());
            progress
                .versions
                .insert(id.to_string(), TOOL_VERSION.to_string());
            self.save(&progress)?;
        }

        Ok(progress)
    }

    /// Idempotent append to the skipped list.
    ///
    /// Skipping does not clear completion and completion does not clear a
    /// skip; the skip list is informational.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn mark_skipped(&self, id: &str) -> Result<Progress> {
        let mut progress = self.load();

        if !progress.is_skipped(id) {
            progress.skipped.push(id.to_string());
            self.save(&progress)?;
        }

        Ok(progress)
    }

    /// Removes the most recently completed prompt (stack order).
    ///
    /// Returns the removed identifier, or `None` when nothing has been
    /// completed (in which case nothing is written).
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn undo_last(&self) -> Result<Option<String>> {
        let mut progress = self.load();

        let Some(last) = progress.completed.pop() else {
            return Ok(None);
        };

        progress.versions.remove(&last);
        self.save(&progress)?;
        Ok(Some(last))
    }

    /// Deletes the branch-scoped record entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn reset(&self) -> Result<()> {
        let path = self.file_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_error("progress", &path, e)),
        }
    }
}

/// Maps every character outside `[A-Za-z0-9-]` to `-` for use in file names.
fn sanitize_branch(branch: &str) -> String {
    branch
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
