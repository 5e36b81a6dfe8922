//! Version-control lookups used to scope persisted state.
//!
//! Everything here shells out to `git` and treats any failure (no git binary,
//! not a repository, non-zero exit) as "no answer". Callers must work without
//! a value; these lookups are never allowed to fail an operation.

use std::path::Path;
use std::process::Command;

use log::debug;

fn git_output(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("git {:?} exited non-zero in `{}`", args, dir.display());
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Name of the currently checked-out branch, or `None` outside a repository.
#[must_use]
pub fn current_branch(dir: &Path) -> Option<String> {
    git_output(dir, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// URL of the `origin` remote, or `None` when unset or outside a repository.
#[must_use]
pub fn origin_url(dir: &Path) -> Option<String> {
    git_output(dir, &["config", "--get", "remote.origin.url"])
}
