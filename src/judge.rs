//! Test-case checker.
//!
//! A case directory holds `NAME.in` task lists next to `NAME.out` files with
//! the expected plan. Every case is simulated and its formatted plan is
//! compared with the expectation.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::input::parse_input;
use crate::output::format_plan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Accepted,
    WrongAnswer { expected: String, actual: String },
    /// No `.out` file next to the `.in` file.
    MissingExpected,
    /// The input itself was rejected.
    Rejected(String),
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        matches!(self, CheckResult::Accepted)
    }
}

#[derive(Debug, Clone)]
pub struct CheckedCase {
    pub path: PathBuf,
    pub result: CheckResult,
}

impl CheckedCase {
    /// Case name: the input file name without extension.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Line endings and trailing whitespace do not count as differences.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

/// Check a single case from its input text and optional expected output.
pub fn check_case(input: &str, expected: Option<&str>) -> CheckResult {
    let Some(expected) = expected else {
        return CheckResult::MissingExpected;
    };
    let parsed = match parse_input(input) {
        Ok(parsed) => parsed,
        Err(e) => return CheckResult::Rejected(e.to_string()),
    };

    let actual = normalize(&format_plan(&parsed.policy.simulate(&parsed.catalog)));
    let expected = normalize(expected);
    if actual == expected {
        CheckResult::Accepted
    } else {
        CheckResult::WrongAnswer { expected, actual }
    }
}

/// Check every `*.in` case in `dir`, in file-name order.
pub fn check_dir(dir: &Path) -> Result<Vec<CheckedCase>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        if path.extension() == Some(OsStr::new("in")) {
            inputs.push(path);
        }
    }
    inputs.sort();

    inputs
        .into_iter()
        .map(|path| -> Result<CheckedCase> {
            let input = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let out_path = path.with_extension("out");
            let expected = if out_path.exists() {
                Some(
                    fs::read_to_string(&out_path)
                        .with_context(|| format!("failed to read {}", out_path.display()))?,
                )
            } else {
                None
            };

            let result = check_case(&input, expected.as_deref());
            debug!(case = %path.display(), passed = result.passed(), "checked");
            Ok(CheckedCase { path, result })
        })
        .collect()
}
