//! Project configuration: the platform/stack selection and its storage.
//!
//! A configuration is one record per project, saved as pretty-printed JSON
//! under a storage directory namespaced by [`project_key`]. It is written
//! wholesale by `init` and never patched in place. Absence of a stored
//! configuration is the signal that interactive setup has not run yet.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::vcs;

/// Number of hex characters kept from the project digest.
const PROJECT_KEY_LEN: usize = 12;

/// File name of the per-project configuration record.
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Mobile,
}

impl Default for Platform {
    fn default() -> Self {
        Self::Web
    }
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    Nextjs,
    React,
    Vue,
    None,
}

impl Frontend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nextjs => "nextjs",
            Self::React => "react",
            Self::Vue => "vue",
            Self::None => "none",
        }
    }
}

impl Display for Frontend {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Supabase,
    Firebase,
    Prisma,
    None,
}

impl Backend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Supabase => "supabase",
            Self::Firebase => "firebase",
            Self::Prisma => "prisma",
            Self::None => "none",
        }
    }
}

impl Display for Backend {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    Flutter,
    ReactNative,
    Native,
    None,
}

impl Framework {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flutter => "flutter",
            Self::ReactNative => "react-native",
            Self::Native => "native",
            Self::None => "none",
        }
    }
}

impl Display for Framework {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The platform/stack selection for one project.
///
/// Only the fields matching `platform` are meaningful: `frontend`/`backend`
/// for web, `framework` for mobile. The `None` enum variants are the user's
/// explicit "no such layer" choice and are distinct from an absent field,
/// which falls back to the defaults when building a run order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<Frontend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: Platform::Web,
            frontend: Some(Frontend::Nextjs),
            backend: Some(Backend::Supabase),
            framework: None,
        }
    }
}

/// Stable identifier for a project, used to namespace persisted state.
///
/// Derived from the git `remote.origin.url` so that all working copies of the
/// same remote share one key; falls back to the directory path when there is
/// no remote.
#[must_use]
pub fn project_key(project_root: &Path) -> String {
    let source = vcs::origin_url(project_root)
        .unwrap_or_else(|| project_root.display().to_string());

    let digest = Sha256::digest(source.as_bytes());
    let mut key = String::with_capacity(PROJECT_KEY_LEN);
    for byte in digest.iter().take(PROJECT_KEY_LEN / 2) {
        key.push_str(&format!("{byte:02x}"));
    }

    key
}

/// Reads and writes the per-project configuration record.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(storage_root: &Path) -> Self {
        Self {
            path: storage_root.join(CONFIG_FILE_NAME),
        }
    }

    #[must_use]
    pub fn for_context(context: &Context) -> Self {
        Self::new(&context.storage_root)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored configuration, or `None` when none has been saved yet.
    ///
    /// A malformed file also yields `None`: first-run and unreadable state
    /// both mean "setup must run", they are not errors.
    #[must_use]
    pub fn load(&self) -> Option<Config> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!("Ignoring malformed config at `{}`: {e}", self.path.display());
                None
            }
        }
    }

    /// Overwrites the stored configuration unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io_error("config", parent, e))?;
        }

        let body = serde_json::to_string_pretty(config)
            .map_err(|e| Error::json_error("writing", "config", &self.path, e))?;

        fs::write(&self.path, body).map_err(|e| Error::io_error("config", &self.path, e))
    }
}

#[derive(Deserialize, Default)]
struct PackageManifest {
    #[serde(default)]
    dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, String>,
}

impl PackageManifest {
    fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Best-guess configuration from the project's manifest files.
///
/// Purely advisory input to the setup flow; never persisted here. Unreadable
/// manifests fall back to the defaults.
#[must_use]
pub fn detect_stack(project_root: &Path) -> Config {
    if project_root.join("pubspec.yaml").exists() {
        return Config {
            platform: Platform::Mobile,
            frontend: None,
            backend: None,
            framework: Some(Framework::Flutter),
        };
    }

    let manifest_path = project_root.join("package.json");
    let Ok(raw) = fs::read_to_string(&manifest_path) else {
        return Config::default();
    };
    let Ok(manifest) = serde_json::from_str::<PackageManifest>(&raw) else {
        debug!("Unparseable package.json at `{}`", manifest_path.display());
        return Config::default();
    };

    if manifest.has_dependency("react-native") {
        return Config {
            platform: Platform::Mobile,
            frontend: None,
            backend: None,
            framework: Some(Framework::ReactNative),
        };
    }

    let frontend = if manifest.has_dependency("next") {
        Frontend::Nextjs
    } else if manifest.has_dependency("react") {
        Frontend::React
    } else if manifest.has_dependency("vue") {
        Frontend::Vue
    } else {
        Frontend::None
    };

    let backend = if manifest.has_dependency("@supabase/supabase-js") {
        Backend::Supabase
    } else if manifest.has_dependency("firebase") {
        Backend::Firebase
    } else if manifest.has_dependency("@prisma/client") {
        Backend::Prisma
    } else {
        Backend::None
    };

    Config {
        platform: Platform::Web,
        frontend: Some(frontend),
        backend: Some(backend),
        framework: None,
    }
}
