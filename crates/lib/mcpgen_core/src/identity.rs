//! Identity lookup collaborator — supplies prefix candidates for AUTO mode.
//!
//! The name resolver consumes candidates lazily in priority order and takes
//! the first non-empty one. All I/O lives here, outside the engine proper.

use std::process::Command;

/// Priority-ordered source of prefix candidates.
pub trait IdentityLookup {
    /// Candidates in priority order; `None` or empty entries are skipped.
    fn lookup(&self) -> Vec<Option<String>>;
}

/// Null lookup for NONE/CUSTOM prefix modes and tests.
pub struct NoIdentity;

impl IdentityLookup for NoIdentity {
    fn lookup(&self) -> Vec<Option<String>> {
        Vec::new()
    }
}

/// Git-backed identity lookup.
///
/// Priority order: explicit `mcpgen.prefix` setting → owner handle derived
/// from `remote.origin.url` → `user.name`.
pub struct GitIdentity;

impl GitIdentity {
    fn git_config(key: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--get", key])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Extract the owner handle from a remote URL such as
    /// `git@github.com:handle/repo.git` or `https://github.com/handle/repo`.
    fn origin_handle() -> Option<String> {
        let url = Self::git_config("remote.origin.url")?;
        let path = match url.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map(|(_, p)| p)?,
            None => url.split_once(':').map(|(_, p)| p)?,
        };
        let handle = path.split('/').next()?.trim();
        if handle.is_empty() {
            None
        } else {
            Some(handle.to_string())
        }
    }
}

impl IdentityLookup for GitIdentity {
    fn lookup(&self) -> Vec<Option<String>> {
        vec![
            Self::git_config("mcpgen.prefix"),
            Self::origin_handle(),
            Self::git_config("user.name"),
        ]
    }
}
