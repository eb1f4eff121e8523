//! The fix table: which files get which rules, in which order.

use crate::rule::FixRule;
use std::fmt;
use std::path::{Path, PathBuf};

/// One row of the table: a file (relative to the working root) and its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFixes {
    pub file: PathBuf,
    pub rules: Vec<FixRule>,
}

/// Ordered, immutable mapping from file path to the rules applied to it.
///
/// Iteration follows insertion order. Adding a path that is already present
/// appends its rules to the existing row, keeping the row's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixSet {
    entries: Vec<FileFixes>,
}

impl FixSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>, rules: Vec<FixRule>) -> Self {
        let file = file.into();
        match self.entries.iter_mut().find(|entry| entry.file == file) {
            Some(entry) => entry.rules.extend(rules),
            None => self.entries.push(FileFixes { file, rules }),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileFixes> {
        self.entries.iter()
    }

    pub fn get(&self, file: impl AsRef<Path>) -> Option<&[FixRule]> {
        let file = file.as_ref();
        self.entries
            .iter()
            .find(|entry| entry.file == file)
            .map(|entry| entry.rules.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every pattern in the table compiles.
    ///
    /// All problems are collected rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for entry in &self.entries {
            if entry.rules.is_empty() {
                issues.push(ValidationIssue::NoRules {
                    file: entry.file.clone(),
                });
            }
            for (index, rule) in entry.rules.iter().enumerate() {
                if let Err(source) = rule.compile() {
                    issues.push(ValidationIssue::InvalidPattern {
                        file: entry.file.clone(),
                        index,
                        message: source.to_string(),
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// The fixes shipped with the tool.
    ///
    /// Each entry patches a known null/undefined access that the TypeScript
    /// compiler flags under `strictNullChecks`.
    pub fn builtin() -> Self {
        Self::new()
            .with_file(
                "components/featured-verusids-carousel.tsx",
                vec![FixRule::new(
                    r"const currentID = featuredIDs\[currentIndex\];",
                    "const currentID = featuredIDs[currentIndex];\n\n  if (!currentID) return null;",
                )],
            )
            .with_file(
                "components/charts/heatmap-calendar.tsx",
                vec![
                    FixRule::new(
                        r"toLocaleDateString\('en-US'",
                        "toLocaleDateString('en-US' as string",
                    ),
                    FixRule::new(
                        r"const formattedDate = date;",
                        "const formattedDate = date || 'Unknown';",
                    ),
                ],
            )
            .with_file(
                "components/interactive-charts.tsx",
                vec![
                    FixRule::new(r"miningStats\.difficulty", "miningStats?.difficulty"),
                    FixRule::new(r"miningStats\.networkHashrate", "miningStats?.networkHashrate"),
                    FixRule::new(r"stakingStats\.apy", "stakingStats?.apy"),
                ],
            )
            .with_file(
                "components/moving-price-ticker.tsx",
                vec![
                    FixRule::new(
                        r"useEffect\(\(\) => \{",
                        "useEffect(() => {\n      if (!currentPrice) return;",
                    ),
                    FixRule::new(r"currentPrice\.price", "currentPrice?.price ?? 0"),
                ],
            )
            .with_file(
                "components/pull-to-refresh.tsx",
                vec![FixRule::new(
                    r"containerRef\.current\.scrollTop",
                    "containerRef.current?.scrollTop ?? 0",
                )],
            )
            .with_file(
                "components/quick-stats-ticker.tsx",
                vec![
                    FixRule::new(r"networkStats\.connections", "networkStats?.connections"),
                    FixRule::new(r"stakingStats\.networkWeight", "stakingStats?.networkWeight"),
                ],
            )
            .with_file(
                "components/ui/breadcrumb.tsx",
                vec![
                    FixRule::new(r"firstItem\.label", "firstItem?.label"),
                    FixRule::new(r"firstItem\.href", "firstItem?.href"),
                ],
            )
            .with_file(
                "components/i18n-error-boundary.tsx",
                vec![FixRule::new(r"override componentDidCatch", "componentDidCatch")],
            )
            .with_file(
                "components/blocks-explorer.tsx",
                vec![FixRule::new(
                    r"calculateTemporalMetrics\(\s*block,",
                    "calculateTemporalMetrics(\n                  block!,",
                )],
            )
            .with_file(
                "lib/cache/cache-utils.ts",
                vec![FixRule::new(r"result\?\.value\.headers", "result?.value?.headers")],
            )
            .with_file(
                "lib/database/secure-db-client.ts",
                vec![FixRule::new(r"this\.pool\.query", "this.pool!.query")],
            )
            .with_file(
                "lib/hooks/use-touch-gestures.ts",
                vec![
                    FixRule::new(
                        r"event\.touches\[0\]\.clientX",
                        "event.touches[0]?.clientX ?? 0",
                    ),
                    FixRule::new(
                        r"event\.touches\[0\]\.clientY",
                        "event.touches[0]?.clientY ?? 0",
                    ),
                ],
            )
            .with_file(
                "lib/i18n/utils.ts",
                vec![
                    FixRule::new(
                        r"code\.split\('-'\)\[0\]",
                        "code?.split('-')[0] || code || 'en'",
                    ),
                    FixRule::new(
                        r"for \(const \{ code \} of languages\)",
                        "for (const { code } of languages) {\n    if (!code) continue;",
                    ),
                ],
            )
    }
}

impl<'a> IntoIterator for &'a FixSet {
    type Item = &'a FileFixes;
    type IntoIter = std::slice::Iter<'a, FileFixes>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    NoRules {
        file: PathBuf,
    },
    InvalidPattern {
        file: PathBuf,
        index: usize,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoRules { file } => {
                write!(f, "{}: no rules configured", file.display())
            }
            ValidationIssue::InvalidPattern {
                file,
                index,
                message,
            } => write!(f, "{} rule #{}: {}", file.display(), index, message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} invalid fix table entries:", self.issues.len())?;
        for issue in &self.issues {
            writeln!(f, "  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
