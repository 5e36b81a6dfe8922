//! The prompt catalog: a directory tree of static text files.
//!
//! The filesystem is the authoritative source of truth (no manifest, no
//! database); this module wraps the directory scan behind a small trait so
//! the run-order builder and its tests do not care where entries come from.
//!
//! Identifiers are catalog-root-relative, `/`-separated paths such as
//! `core/security/code-analysis.txt`. Files under the project's custom
//! directory get identifiers in the `custom/` namespace instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::context::Context;

/// Extension shared by every prompt file.
pub const PROMPT_SUFFIX: &str = ".txt";

/// Identifier namespace for user-supplied prompts.
pub const CUSTOM_NAMESPACE: &str = "custom";

/// Directory name excluded from recursive scans at any depth.
const WORKFLOW_DIR: &str = "workflow";

/// A source of prompt entries and their content.
pub trait Catalog {
    /// Prompt files directly inside `subdir`, sorted lexicographically.
    ///
    /// A missing directory contributes zero entries, not an error.
    fn list(&self, subdir: &str) -> Vec<String>;

    /// All prompt files under `subdir` recursively, excluding `workflow`
    /// subtrees, sorted lexicographically by full identifier.
    fn list_recursive(&self, subdir: &str) -> Vec<String>;

    /// Raw content of the prompt, or `None` when the identifier has no file.
    fn read(&self, id: &str) -> Option<String>;
}

/// Catalog backed by the real prompt tree on disk.
pub struct FsCatalog {
    root: PathBuf,
    custom_root: Option<PathBuf>,
}

impl FsCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            custom_root: None,
        }
    }

    /// Catalog that also serves the `custom/` namespace from `custom_root`.
    pub fn with_custom_dir(root: impl Into<PathBuf>, custom_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            custom_root: Some(custom_root.into()),
        }
    }

    #[must_use]
    pub fn for_context(context: &Context) -> Self {
        Self::with_custom_dir(&context.catalog_root, context.custom_dir())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for an identifier, whichever namespace it lives in.
    #[must_use]
    pub fn full_path(&self, id: &str) -> PathBuf {
        if let Some(rest) = strip_namespace(id, CUSTOM_NAMESPACE) {
            if let Some(custom_root) = &self.custom_root {
                return custom_root.join(rest);
            }
        }
        self.root.join(id)
    }

    /// Maps an identifier-space subdir onto the directory that backs it.
    fn backing_dir(&self, subdir: &str) -> Option<PathBuf> {
        if subdir == CUSTOM_NAMESPACE {
            return self.custom_root.clone();
        }
        if let Some(rest) = strip_namespace(subdir, CUSTOM_NAMESPACE) {
            return self.custom_root.as_ref().map(|root| root.join(rest));
        }
        Some(self.root.join(subdir))
    }
}

fn strip_namespace<'a>(id: &'a str, namespace: &str) -> Option<&'a str> {
    id.strip_prefix(namespace)?.strip_prefix('/')
}

fn is_prompt_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(PROMPT_SUFFIX))
            .unwrap_or(false)
}

fn scan_flat(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| is_prompt_file(&entry.path()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn scan_tree(dir: &Path, rel: &str, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let child_rel = if rel.is_empty() {
            name.clone()
        } else {
            format!("{rel}/{name}")
        };

        if path.is_dir() {
            if name != WORKFLOW_DIR {
                scan_tree(&path, &child_rel, out);
            }
        } else if is_prompt_file(&path) {
            out.push(child_rel);
        }
    }
}

impl Catalog for FsCatalog {
    fn list(&self, subdir: &str) -> Vec<String> {
        let Some(dir) = self.backing_dir(subdir) else {
            return Vec::new();
        };

        scan_flat(&dir)
            .into_iter()
            .map(|name| format!("{subdir}/{name}"))
            .collect()
    }

    fn list_recursive(&self, subdir: &str) -> Vec<String> {
        let Some(dir) = self.backing_dir(subdir) else {
            return Vec::new();
        };

        let mut relative = Vec::new();
        scan_tree(&dir, "", &mut relative);

        let mut ids: Vec<String> = relative
            .into_iter()
            .map(|rel| format!("{subdir}/{rel}"))
            .collect();
        ids.sort();
        debug!("Scanned `{subdir}`: {} prompt(s)", ids.len());
        ids
    }

    fn read(&self, id: &str) -> Option<String> {
        fs::read_to_string(self.full_path(id)).ok()
    }
}

/// In-memory catalog for hermetic tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: BTreeMap<String, String>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, content: &str) {
        self.entries.insert(id.to_string(), content.to_string());
    }
}

impl Catalog for MemoryCatalog {
    fn list(&self, subdir: &str) -> Vec<String> {
        let prefix = format!("{subdir}/");
        self.entries
            .keys()
            .filter(|id| {
                id.strip_prefix(&prefix)
                    .map(|rest| !rest.contains('/') && rest.ends_with(PROMPT_SUFFIX))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    fn list_recursive(&self, subdir: &str) -> Vec<String> {
        let prefix = format!("{subdir}/");
        self.entries
            .keys()
            .filter(|id| {
                let Some(rest) = id.strip_prefix(&prefix) else {
                    return false;
                };
                rest.ends_with(PROMPT_SUFFIX)
                    && !rest.split('/').any(|segment| segment == WORKFLOW_DIR)
            })
            .cloned()
            .collect()
    }

    fn read(&self, id: &str) -> Option<String> {
        self.entries.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("content of {rel}")).unwrap();
    }

    #[test]
    fn test_list_is_flat_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "core/security/b.txt");
        touch(dir.path(), "core/security/a.txt");
        touch(dir.path(), "core/security/nested/c.txt");
        touch(dir.path(), "core/security/notes.md");

        let catalog = FsCatalog::new(dir.path());
        assert_eq!(
            catalog.list("core/security"),
            vec!["core/security/a.txt", "core/security/b.txt"]
        );
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = FsCatalog::new(dir.path());
        assert!(catalog.list("core/absent").is_empty());
    }

    #[test]
    fn test_list_recursive_excludes_workflow() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "mobile/core/perf/startup.txt");
        touch(dir.path(), "mobile/core/state.txt");
        touch(dir.path(), "mobile/core/workflow/steps.txt");
        touch(dir.path(), "mobile/core/perf/workflow/inner.txt");

        let catalog = FsCatalog::new(dir.path());
        assert_eq!(
            catalog.list_recursive("mobile/core"),
            vec!["mobile/core/perf/startup.txt", "mobile/core/state.txt"]
        );
    }

    #[test]
    fn test_custom_namespace_maps_to_custom_root() {
        let catalog_dir = TempDir::new().unwrap();
        let project_dir = TempDir::new().unwrap();
        let custom = project_dir.path().join(".redpen");
        touch(&custom, "my-check.txt");
        touch(&custom, "deep/other.txt");

        let catalog = FsCatalog::with_custom_dir(catalog_dir.path(), &custom);
        assert_eq!(
            catalog.list_recursive(CUSTOM_NAMESPACE),
            vec!["custom/deep/other.txt", "custom/my-check.txt"]
        );
        assert_eq!(
            catalog.read("custom/my-check.txt").unwrap(),
            "content of my-check.txt"
        );
    }

    #[test]
    fn test_custom_namespace_without_custom_root() {
        let dir = TempDir::new().unwrap();
        let catalog = FsCatalog::new(dir.path());
        assert!(catalog.list_recursive(CUSTOM_NAMESPACE).is_empty());
        assert!(catalog.read("custom/my-check.txt").is_none());
    }

    #[test]
    fn test_read_main_namespace() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "core/security/a.txt");

        let catalog = FsCatalog::new(dir.path());
        assert_eq!(
            catalog.read("core/security/a.txt").unwrap(),
            "content of core/security/a.txt"
        );
        assert!(catalog.read("core/security/missing.txt").is_none());
    }

    #[test]
    fn test_memory_catalog_matches_fs_semantics() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("core/security/b.txt", "b");
        catalog.insert("core/security/a.txt", "a");
        catalog.insert("core/security/nested/c.txt", "c");
        catalog.insert("mobile/core/workflow/steps.txt", "w");
        catalog.insert("mobile/core/state.txt", "s");

        assert_eq!(
            catalog.list("core/security"),
            vec!["core/security/a.txt", "core/security/b.txt"]
        );
        assert_eq!(
            catalog.list_recursive("mobile/core"),
            vec!["mobile/core/state.txt"]
        );
        assert_eq!(catalog.read("core/security/a.txt").unwrap(), "a");
    }
}
