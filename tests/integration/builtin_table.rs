//! The shipped fix table applied to a mock TypeScript project.

use std::fs;
use tempfile::TempDir;
use ts_fixer::{report, FixSet, Patcher, RunOptions, RunSummary};

const CAROUSEL: &str = r#"export function FeaturedCarousel({ featuredIDs }: Props) {
  const [currentIndex, setCurrentIndex] = useState(0);
  const currentID = featuredIDs[currentIndex];
  return <Card id={currentID.name} />;
}
"#;

const TICKER: &str = r#"export function MovingPriceTicker({ currentPrice }: Props) {
  useEffect(() => {
    setDisplay(currentPrice.price);
  }, [currentPrice]);
  return <span>{currentPrice.price}</span>;
}
"#;

const I18N_UTILS: &str = r#"export function baseLanguages(languages: Language[]) {
  const out = [];
  for (const { code } of languages)
    out.push(code.split('-')[0]);
  return out;
}
"#;

const TOUCH: &str = r#"const startX = event.touches[0].clientX;
const startY = event.touches[0].clientY;
"#;

const BLOCKS: &str = r#"const metrics = calculateTemporalMetrics(
                  block,
                  previous,
                );
"#;

/// Mock project with a subset of the table's files present.
fn setup_mock_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let files = [
        ("components/featured-verusids-carousel.tsx", CAROUSEL),
        ("components/moving-price-ticker.tsx", TICKER),
        ("lib/i18n/utils.ts", I18N_UTILS),
        ("lib/hooks/use-touch-gestures.ts", TOUCH),
        ("components/blocks-explorer.tsx", BLOCKS),
        (
            "components/ui/breadcrumb.tsx",
            "<a href={firstItem.href}>{firstItem.label}</a>\n",
        ),
        (
            "components/i18n-error-boundary.tsx",
            "  override componentDidCatch(error: Error) {}\n",
        ),
        ("lib/database/secure-db-client.ts", "return this.pool.query(sql);\n"),
        // present but already clean
        ("lib/cache/cache-utils.ts", "const h = result?.value?.headers;\n"),
        // not in the table at all
        ("components/untouched.tsx", "const a = miningStats.difficulty;\n"),
    ];
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

fn read(dir: &TempDir, path: &str) -> String {
    fs::read_to_string(dir.path().join(path)).unwrap()
}

#[test]
fn test_builtin_run_patches_present_files() {
    let project = setup_mock_project();
    let patcher = Patcher::new(project.path()).unwrap();

    let summary = report::run(&patcher, &FixSet::builtin(), RunOptions::default());

    // 13 rows: 8 fixed, 1 already clean, 4 missing from the mock project
    assert_eq!(
        summary,
        RunSummary {
            fixed: 8,
            unchanged: 1,
            failed: 4
        }
    );

    assert_eq!(
        read(&project, "components/featured-verusids-carousel.tsx"),
        CAROUSEL.replace(
            "const currentID = featuredIDs[currentIndex];\n",
            "const currentID = featuredIDs[currentIndex];\n\n  if (!currentID) return null;\n"
        )
    );
    assert_eq!(
        read(&project, "components/ui/breadcrumb.tsx"),
        "<a href={firstItem?.href}>{firstItem?.label}</a>\n"
    );
    assert_eq!(
        read(&project, "components/i18n-error-boundary.tsx"),
        "  componentDidCatch(error: Error) {}\n"
    );
    assert_eq!(
        read(&project, "lib/database/secure-db-client.ts"),
        "return this.pool!.query(sql);\n"
    );
    assert_eq!(
        read(&project, "lib/hooks/use-touch-gestures.ts"),
        "const startX = event.touches[0]?.clientX ?? 0;\nconst startY = event.touches[0]?.clientY ?? 0;\n"
    );
    assert_eq!(
        read(&project, "components/blocks-explorer.tsx"),
        "const metrics = calculateTemporalMetrics(\n                  block!,\n                  previous,\n                );\n"
    );
}

#[test]
fn test_builtin_sequential_rules_in_one_file() {
    let project = setup_mock_project();
    let patcher = Patcher::new(project.path()).unwrap();
    let fixes = FixSet::builtin();

    assert!(patcher.apply_fixes(
        "components/moving-price-ticker.tsx",
        fixes.get("components/moving-price-ticker.tsx").unwrap(),
    ));

    assert_eq!(
        read(&project, "components/moving-price-ticker.tsx"),
        r#"export function MovingPriceTicker({ currentPrice }: Props) {
  useEffect(() => {
      if (!currentPrice) return;
    setDisplay(currentPrice?.price ?? 0);
  }, [currentPrice]);
  return <span>{currentPrice?.price ?? 0}</span>;
}
"#
    );

    assert!(patcher.apply_fixes(
        "lib/i18n/utils.ts",
        fixes.get("lib/i18n/utils.ts").unwrap(),
    ));
    assert_eq!(
        read(&project, "lib/i18n/utils.ts"),
        r#"export function baseLanguages(languages: Language[]) {
  const out = [];
  for (const { code } of languages) {
    if (!code) continue;
    out.push(code?.split('-')[0] || code || 'en');
  return out;
}
"#
    );
}

#[test]
fn test_builtin_second_run_is_a_noop() {
    let project = setup_mock_project();
    let patcher = Patcher::new(project.path()).unwrap();
    let fixes = FixSet::builtin();

    let first = report::run(&patcher, &fixes, RunOptions::default());
    assert_eq!(first.fixed, 8);

    let snapshot: Vec<(std::path::PathBuf, Option<String>)> = fixes
        .iter()
        .map(|entry| {
            let path = project.path().join(&entry.file);
            (entry.file.clone(), fs::read_to_string(path).ok())
        })
        .collect();

    let second = report::run(&patcher, &fixes, RunOptions::default());
    assert_eq!(
        second,
        RunSummary {
            fixed: 0,
            unchanged: 9,
            failed: 4
        }
    );

    for (file, before) in snapshot {
        let after = fs::read_to_string(project.path().join(&file)).ok();
        assert_eq!(after, before, "{} changed on second run", file.display());
    }
}

#[test]
fn test_files_outside_table_are_untouched() {
    let project = setup_mock_project();
    let patcher = Patcher::new(project.path()).unwrap();

    let _ = report::run(&patcher, &FixSet::builtin(), RunOptions::default());

    assert_eq!(
        read(&project, "components/untouched.tsx"),
        "const a = miningStats.difficulty;\n"
    );
}

#[test]
fn test_builtin_dry_run_writes_nothing() {
    let project = setup_mock_project();
    let patcher = Patcher::new(project.path()).unwrap().dry_run(true);

    let summary = report::run(&patcher, &FixSet::builtin(), RunOptions::default());

    assert_eq!(summary.fixed, 8);
    assert_eq!(read(&project, "components/featured-verusids-carousel.tsx"), CAROUSEL);
    assert_eq!(read(&project, "lib/hooks/use-touch-gestures.ts"), TOUCH);
}
