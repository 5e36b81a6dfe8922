//! Explicit execution context threaded through every core operation.
//!
//! There is no module-level state: everything that depends on "where am I"
//! (the project being audited, the prompt catalog, the storage namespace) is
//! carried by a [`Context`] so tests can point the engine at temporary
//! directories.

use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;

use crate::config::project_key;
use crate::error::{Error, Result};

/// Environment variable that overrides prompt catalog discovery.
pub const PROMPTS_ENV_VAR: &str = "REDPEN_PROMPTS";

/// Directory inside the project that holds user-supplied custom prompts.
pub const CUSTOM_DIR_NAME: &str = ".redpen";

/// The three roots every core operation works against.
#[derive(Debug, Clone)]
pub struct Context {
    /// The project being audited (normally the working directory).
    pub project_root: PathBuf,
    /// Root of the prompt catalog tree.
    pub catalog_root: PathBuf,
    /// Per-project directory for persisted config and progress.
    pub storage_root: PathBuf,
}

impl Context {
    pub fn new(
        project_root: impl Into<PathBuf>,
        catalog_root: impl Into<PathBuf>,
        storage_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            catalog_root: catalog_root.into(),
            storage_root: storage_root.into(),
        }
    }

    /// Resolves the context for the current invocation.
    ///
    /// The project root is the working directory. The catalog root comes from
    /// `catalog_override` when given, otherwise from [`default_catalog_root`].
    /// The storage root is namespaced by [`project_key`] so that projects on
    /// one machine do not collide, and lives outside the working tree so it
    /// survives checkouts and is never committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unreadable or no platform
    /// configuration directory exists.
    pub fn discover(catalog_override: Option<&Path>) -> Result<Self> {
        let project_root = env::current_dir()?;

        let catalog_root = match catalog_override {
            Some(path) => path.to_path_buf(),
            None => default_catalog_root()?,
        };

        let storage_root = config_base_dir()?
            .join("projects")
            .join(project_key(&project_root));

        debug!(
            "Context: project=`{}` catalog=`{}` storage=`{}`",
            project_root.display(),
            catalog_root.display(),
            storage_root.display()
        );

        Ok(Self {
            project_root,
            catalog_root,
            storage_root,
        })
    }

    /// The project's custom-prompts directory (`<project>/.redpen`).
    #[must_use]
    pub fn custom_dir(&self) -> PathBuf {
        self.project_root.join(CUSTOM_DIR_NAME)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "redpen", "redpen").ok_or(Error::NoConfigDir)
}

/// Base directory for all persisted redpen state on this machine.
///
/// # Errors
///
/// Returns an error if the platform provides no home directory.
pub fn config_base_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Locates the prompt catalog for this installation.
///
/// Checked in order: the `REDPEN_PROMPTS` environment variable, a `prompts`
/// directory next to the executable (including two levels up, for cargo
/// target layouts), then the platform data directory. When none of the
/// candidates exist yet, the data-directory path is still returned so callers
/// such as `doctor` can report the catalog as missing rather than failing
/// discovery outright.
///
/// # Errors
///
/// Returns an error only when the platform provides no home directory.
pub fn default_catalog_root() -> Result<PathBuf> {
    if let Ok(dir) = env::var(PROMPTS_ENV_VAR) {
        return Ok(PathBuf::from(dir));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join("prompts"));
            // target/{debug,release}/redpen -> repository root
            candidates.push(dir.join("..").join("..").join("prompts"));
        }
    }

    let fallback = project_dirs()?.data_dir().join("prompts");
    candidates.push(fallback.clone());

    for candidate in candidates {
        if candidate.is_dir() {
            debug!("Using prompt catalog at `{}`", candidate.display());
            return Ok(candidate);
        }
    }

    Ok(fallback)
}
