use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directories under the working root that are never patched.
const FORBIDDEN_DIRS: &[&str] = &["node_modules", ".git"];

/// Keeps every patched file inside the working root.
#[derive(Debug, Clone)]
pub struct WorkspaceGuard {
    /// Canonical working root
    workspace_root: PathBuf,
    /// Canonical paths to forbidden directories
    forbidden_paths: Vec<PathBuf>,
}

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Path is outside workspace: {path} (workspace: {workspace})")]
    OutsideWorkspace { path: PathBuf, workspace: PathBuf },

    #[error("Path is in forbidden directory: {path} (forbidden: {forbidden})")]
    ForbiddenPath { path: PathBuf, forbidden: PathBuf },

    #[error("Failed to resolve {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl WorkspaceGuard {
    /// Create a guard rooted at `workspace_root`, which must exist.
    pub fn new(workspace_root: impl AsRef<Path>) -> Result<Self, SafetyError> {
        let workspace_root = canonicalize(workspace_root.as_ref())?;

        // Only directories that exist can be canonicalized; missing ones
        // cannot contain a target anyway.
        let forbidden_paths = FORBIDDEN_DIRS
            .iter()
            .filter_map(|dir| workspace_root.join(dir).canonicalize().ok())
            .collect();

        Ok(Self {
            workspace_root,
            forbidden_paths,
        })
    }

    /// Resolve `path` against the root and check it is safe to patch.
    ///
    /// Returns the canonical absolute path. The file must exist.
    pub fn validate_path(&self, path: impl AsRef<Path>) -> Result<PathBuf, SafetyError> {
        let path = path.as_ref();

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        };

        let canonical = canonicalize(&absolute)?;

        if !canonical.starts_with(&self.workspace_root) {
            return Err(SafetyError::OutsideWorkspace {
                path: canonical,
                workspace: self.workspace_root.clone(),
            });
        }

        if let Some(forbidden) = self
            .forbidden_paths
            .iter()
            .find(|forbidden| canonical.starts_with(forbidden))
        {
            return Err(SafetyError::ForbiddenPath {
                path: canonical,
                forbidden: forbidden.clone(),
            });
        }

        Ok(canonical)
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, SafetyError> {
    path.canonicalize()
        .map_err(|source| SafetyError::Canonicalize {
            path: path.to_path_buf(),
            source,
        })
}
