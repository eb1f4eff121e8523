use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use ts_fixer::{report, FixSet, Patcher, RunOptions};

#[derive(Parser)]
#[command(name = "ts-fixer")]
#[command(about = "Apply the built-in null-safety fixes to a TypeScript tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Defaults to `apply` in the current directory
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the fixes (default)
    Apply {
        #[command(flatten)]
        root: RootArg,

        /// Dry run - show what would be changed without modifying files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Report which files would change, without writing
    Status {
        #[command(flatten)]
        root: RootArg,
    },

    /// List the built-in fix table
    List,
}

#[derive(Args)]
struct RootArg {
    /// Directory the table's paths are relative to (defaults to the current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl RootArg {
    fn resolve(self) -> Result<PathBuf> {
        match self.root {
            Some(root) => Ok(root),
            None => env::current_dir().context("Could not determine current directory"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let fixes = FixSet::builtin();

    if let Err(e) = fixes.validate() {
        // Broken rows still fail individually during the run.
        eprintln!("{}", format!("Warning: {e}").yellow());
    }

    match cli.command {
        None => cmd_apply(RootArg { root: None }, false, false, &fixes),
        Some(Commands::Apply {
            root,
            dry_run,
            diff,
        }) => cmd_apply(root, dry_run, diff, &fixes),
        Some(Commands::Status { root }) => cmd_apply(root, true, false, &fixes),
        Some(Commands::List) => {
            report::list(&fixes);
            Ok(())
        }
    }
}

fn cmd_apply(root: RootArg, dry_run: bool, show_diff: bool, fixes: &FixSet) -> Result<()> {
    let root = root.resolve()?;
    let patcher = Patcher::new(&root)
        .with_context(|| format!("Invalid root directory {}", root.display()))?
        .dry_run(dry_run);

    // Per-file failures are printed by the driver and never change the exit code.
    let _summary = report::run(&patcher, fixes, RunOptions { show_diff });

    Ok(())
}
