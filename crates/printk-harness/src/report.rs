//! Report generation for conformance results.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::error::HarnessError;
use crate::verify::VerificationSummary;

/// A fixture file that fed the run, with its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDigest {
    pub path: String,
    pub sha256: String,
    pub cases: usize,
}

impl FixtureDigest {
    /// Hash the file at `path`.
    pub fn of_file(path: &Path, cases: usize) -> Result<Self, HarnessError> {
        let data = std::fs::read(path)?;
        Ok(Self {
            path: path.display().to_string(),
            sha256: sha256_hex(&data),
            cases,
        })
    }
}

/// A conformance report over one or more fixture files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Argument mode(s) tested.
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Fixture inputs.
    pub fixtures: Vec<FixtureDigest>,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        if !self.fixtures.is_empty() {
            out.push_str("## Fixtures\n\n");
            for f in &self.fixtures {
                out.push_str(&format!(
                    "- `{}` ({} cases) sha256 `{}`\n",
                    f.path, f.cases, f.sha256
                ));
            }
            out.push('\n');
        }

        out.push_str("| Case | Section | Mode | Count | Status |\n");
        out.push_str("|------|---------|------|-------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                r.case_name, r.section, r.mode, r.actual_count, status
            ));
        }

        let failures: Vec<_> = self.summary.failures().collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n```\n", r.case_name));
                out.push_str(r.diff.as_deref().unwrap_or("(no diff)"));
                out.push_str("\n```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

fn sha256_hex(data: &[u8]) -> String {
    use std::fmt::Write;
    let digest = sha2::Sha256::digest(data);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}
