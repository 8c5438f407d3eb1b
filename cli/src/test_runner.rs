use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const CASE_SUFFIX: &str = ".case.toml";

/// One translation case, stored as a whole `.case.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    /// Human-readable case description.
    #[serde(default)]
    pub description: Option<String>,

    pub template: String,
    pub message: String,
    pub translation: String,

    /// Exact expected translation.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Translation must fail with an error whose Display contains this.
    #[serde(default)]
    pub expect_error: Option<String>,
}

pub enum CaseOutcome {
    Pass,
    Fail(String),
}

pub struct CaseResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: CaseOutcome,
}

impl CaseResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(CASE_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn load_case(path: &Path) -> Result<CaseConfig, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("cannot read file: {e}"))?;
    let content = content.trim_start_matches('\u{feff}');
    toml::from_str(content).map_err(|e| format!("TOML parse error: {e}"))
}

/// Compare a translation result with the case's expectations.
fn check(case: &CaseConfig, result: Result<String, reprintf::Error>) -> Option<String> {
    match (&case.expect_error, &case.expect_output, result) {
        (Some(expected), _, Err(err)) => {
            let actual = err.to_string();
            (!actual.contains(expected.as_str()))
                .then(|| format!("expected error containing \"{expected}\", got: {actual}"))
        }
        (Some(expected), _, Ok(output)) => Some(format!(
            "expected error containing \"{expected}\", but translation produced: {output}"
        )),
        (None, _, Err(err)) => Some(format!("unexpected error: {err}")),
        (None, Some(expected), Ok(actual)) => (actual != *expected).then(|| {
            format!("output mismatch\n  expected: {expected:?}\n  actual:   {actual:?}")
        }),
        (None, None, Ok(_)) => None,
    }
}

fn run_single_case(path: &Path) -> CaseResult {
    let (description, outcome) = match load_case(path) {
        Ok(case) => {
            let result = reprintf::translate(&case.template, &case.message, &case.translation);
            let outcome = match check(&case, result) {
                Some(reason) => CaseOutcome::Fail(reason),
                None => CaseOutcome::Pass,
            };
            (case.description, outcome)
        }
        Err(reason) => (None, CaseOutcome::Fail(reason)),
    };

    CaseResult {
        path: path.to_path_buf(),
        description,
        outcome,
    }
}

/// Discover case files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "".
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_cases(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_cases(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_cases(&path, root, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(CASE_SUFFIX))
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {CASE_SUFFIX} files found in {}", path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} cases)", category_label(category), files.len());
    }
}

/// Keep the categories named in `requested`, including their subfolders.
fn select<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a [PathBuf]> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
    }

    let mut selected = BTreeMap::new();
    for wanted in requested {
        let wanted = wanted.trim_matches('/');
        let prefix = format!("{wanted}/");
        let before = selected.len();
        for (category, files) in all {
            if category == wanted || category.starts_with(&prefix) {
                selected.insert(category.as_str(), files.as_slice());
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{wanted}' not found (available: {})",
                available.join(", ")
            );
        }
    }
    selected
}

struct Style {
    no_color: bool,
}

impl Style {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            format!("\x1b[{code}m{text}\x1b[0m")
        }
    }

    fn pass(&self) -> String {
        self.paint("32", "PASS")
    }

    fn fail(&self) -> String {
        self.paint("31", "FAIL")
    }

    fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }
}

/// Run all case files under `path` (or the single file `path`), optionally
/// limited to `categories`. Returns the process exit code.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { no_color };

    let single;
    let all;
    let selected: BTreeMap<&str, &[PathBuf]> = if path.is_file() {
        single = [path.to_path_buf()];
        BTreeMap::from([("", &single[..])])
    } else {
        all = discover_categorized(path);
        if all.is_empty() {
            eprintln!("no {CASE_SUFFIX} files found in {}", path.display());
            return 1;
        }
        select(&all, categories)
    };

    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<CaseResult> = Vec::new();

    for (category, files) in &selected {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", style.bold(category_label(category)));
        }

        for file in *files {
            let result = run_single_case(file);
            match result.outcome {
                CaseOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", style.pass(), result.label());
                }
                CaseOutcome::Fail(_) => {
                    eprintln!("  {}  {}", style.fail(), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let CaseOutcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    eprintln!("  {line}");
                }
            }
        }
    }

    eprintln!();
    if failures.is_empty() {
        eprintln!("test result: {}. {passed} passed, 0 failed", style.paint("32", "ok"));
        0
    } else {
        let failed = failures.len();
        eprintln!(
            "test result: {}. {passed} passed, {failed} failed (of {})",
            style.paint("31", "FAILED"),
            passed + failed
        );
        1
    }
}
