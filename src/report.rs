//! Driver loop and console reporting.

use crate::fixset::FixSet;
use crate::patcher::{FixOutcome, Patcher};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::fmt;
use std::path::Path;

/// Per-run counts, one bucket per file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fixed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.fixed + self.unchanged + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fixed, {} unchanged, {} failed",
            self.fixed, self.unchanged, self.failed
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print a unified diff for every changed file
    pub show_diff: bool,
}

/// Process every entry of `fixes` in table order and print one line per file.
///
/// A failing file never stops the run; the final line is always `Done!`.
pub fn run(patcher: &Patcher, fixes: &FixSet, options: RunOptions) -> RunSummary {
    let mut summary = RunSummary::default();

    if patcher.is_dry_run() {
        println!("{}", "[DRY RUN - no files will be written]".cyan());
    }
    println!("Applying fixes under {}...", patcher.root().display());

    for entry in fixes {
        match patcher.try_apply_fixes(&entry.file, &entry.rules) {
            Ok(FixOutcome::Fixed {
                file,
                before,
                after,
            }) => {
                let verb = if patcher.is_dry_run() {
                    "Would fix"
                } else {
                    "Fixed"
                };
                println!("{} {} {}", "✓".green(), verb, file.display());
                summary.fixed += 1;

                if options.show_diff {
                    display_diff(&file, &before, &after);
                }
            }
            Ok(FixOutcome::Unchanged { file }) => {
                println!("{} Unchanged {}", "·".dimmed(), file.display());
                summary.unchanged += 1;
            }
            Err(e) => {
                println!("{} Error fixing {}: {}", "✗".red(), entry.file.display(), e);
                summary.failed += 1;
            }
        }
    }

    println!();
    println!("Summary: {summary}");
    println!("{}", "Done!".bold());

    summary
}

/// Print the table without touching any file.
pub fn list(fixes: &FixSet) {
    for entry in fixes {
        println!("{}", entry.file.display().to_string().bold());
        for rule in &entry.rules {
            println!("  {rule}");
        }
    }
}

fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", line);
    }
    println!();
}
