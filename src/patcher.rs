//! Per-file read / substitute / conditional write.

use crate::edit::{apply_rules, atomic_write, PatternError};
use crate::rule::FixRule;
use crate::safety::{SafetyError, WorkspaceGuard};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FixOutcome should be checked for fixed/unchanged"]
pub enum FixOutcome {
    /// Content changed (and was written, unless dry-running)
    Fixed {
        file: PathBuf,
        before: String,
        after: String,
    },
    /// No rule changed the content; nothing was written
    Unchanged { file: PathBuf },
}

impl FixOutcome {
    pub fn file(&self) -> &Path {
        match self {
            FixOutcome::Fixed { file, .. } | FixOutcome::Unchanged { file } => file,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, FixOutcome::Fixed { .. })
    }
}

/// Any failure while processing a single file.
///
/// The driver treats every variant the same way; the variants only exist to
/// give the printed message its context.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Pattern {
        path: PathBuf,
        source: PatternError,
    },

    #[error(transparent)]
    Safety(#[from] SafetyError),
}

/// Applies fix rules to files under a working root.
#[derive(Debug, Clone)]
pub struct Patcher {
    guard: WorkspaceGuard,
    dry_run: bool,
}

impl Patcher {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SafetyError> {
        Ok(Self {
            guard: WorkspaceGuard::new(root)?,
            dry_run: false,
        })
    }

    /// Compute outcomes without writing anything.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn root(&self) -> &Path {
        self.guard.workspace_root()
    }

    /// Apply `rules` to `path`, printing any failure instead of returning it.
    ///
    /// Returns `true` only when the file content changed.
    pub fn apply_fixes(&self, path: impl AsRef<Path>, rules: &[FixRule]) -> bool {
        let path = path.as_ref();
        match self.try_apply_fixes(path, rules) {
            Ok(outcome) => outcome.is_fixed(),
            Err(e) => {
                println!("{} Error fixing {}: {}", "✗".red(), path.display(), e);
                false
            }
        }
    }

    /// Apply `rules` to `path` (relative to the root) in order.
    ///
    /// The file is written at most once, and only if the final text differs
    /// from what was read.
    pub fn try_apply_fixes(
        &self,
        path: impl AsRef<Path>,
        rules: &[FixRule],
    ) -> Result<FixOutcome, FixError> {
        let file = path.as_ref().to_path_buf();
        let resolved = self.guard.validate_path(&file)?;

        let before = fs::read_to_string(&resolved).map_err(|source| FixError::Read {
            path: file.clone(),
            source,
        })?;

        let after = apply_rules(&before, rules).map_err(|source| FixError::Pattern {
            path: file.clone(),
            source,
        })?;

        if after == before {
            return Ok(FixOutcome::Unchanged { file });
        }

        if !self.dry_run {
            atomic_write(&resolved, after.as_bytes()).map_err(|source| FixError::Write {
                path: file.clone(),
                source,
            })?;
        }

        Ok(FixOutcome::Fixed {
            file,
            before,
            after,
        })
    }
}
