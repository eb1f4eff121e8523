//! ts-fixer: one-shot regex patcher for known TypeScript null-safety issues
//!
//! The tool carries a fixed table ([`FixSet::builtin`]) mapping source files
//! to ordered lists of regex substitutions ([`FixRule`]). Each file is read,
//! every rule is applied in order to the running text, and the file is
//! written back only if the final text differs from what was read.
//!
//! # Behaviour
//!
//! - Patterns are compiled in multi-line mode and replace every match
//! - Rules compose: rule *n* sees the output of rule *n - 1*
//! - Already-applied insertion sites are left alone, so reruns are no-ops
//! - Writes are atomic (tempfile + fsync + rename)
//! - A failing file is reported and skipped; the run always completes
//!
//! # Example
//!
//! ```no_run
//! use ts_fixer::{FixRule, Patcher};
//!
//! let patcher = Patcher::new(".").unwrap();
//! let changed = patcher.apply_fixes(
//!     "lib/cache/cache-utils.ts",
//!     &[FixRule::new(r"result\?\.value\.headers", "result?.value?.headers")],
//! );
//! println!("changed: {changed}");
//! ```

pub mod edit;
pub mod fixset;
pub mod patcher;
pub mod report;
pub mod rule;
pub mod safety;

// Re-exports
pub use edit::{apply_rules, atomic_write, PatternError};
pub use fixset::{FileFixes, FixSet, ValidationError, ValidationIssue};
pub use patcher::{FixError, FixOutcome, Patcher};
pub use report::{run, RunOptions, RunSummary};
pub use rule::{CompiledRule, FixRule};
pub use safety::{SafetyError, WorkspaceGuard};
