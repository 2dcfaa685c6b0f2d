//! Test execution engine.

use printk_core::{ArgError, ArgMode, Args, FormatError, HealingArgs, vprintk};

use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Argument mode under test.
    pub mode: ArgMode,
}

/// What one formatting call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub output: Vec<u8>,
    pub count: usize,
    pub error: Option<ArgError>,
    pub repairs: usize,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: ArgMode) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(self.mode, &case.mode))
            .map(|case| self.verify_case(case))
            .collect()
    }

    fn verify_case(&self, case: &FixtureCase) -> VerificationResult {
        let run = execute(case, self.mode);
        let actual = String::from_utf8_lossy(&run.output).into_owned();
        let error = run.error.map(|e| error_label(&e).to_string());

        let mut notes = Vec::new();
        if run.count != case.expected_count {
            notes.push(format!(
                "count: expected {}, got {}",
                case.expected_count, run.count
            ));
        }
        if run.count != run.output.len() {
            notes.push(format!(
                "count {} does not match {} bytes delivered",
                run.count,
                run.output.len()
            ));
        }
        match self.mode {
            ArgMode::Strict if error != case.expect_error => notes.push(format!(
                "error: expected {:?}, got {:?}",
                case.expect_error, error
            )),
            ArgMode::Hardened if case.expect_error.is_some() && run.repairs == 0 => {
                notes.push("expected at least one repaired argument".to_string());
            }
            _ => {}
        }

        let passed = actual == case.expected_output && notes.is_empty();
        let diff = if actual != case.expected_output {
            let mut d = diff::render_diff(&case.expected_output, &actual);
            for note in &notes {
                d.push_str(note);
                d.push('\n');
            }
            Some(d)
        } else if !notes.is_empty() {
            Some(notes.join("\n"))
        } else {
            None
        };

        let case_name = if case.mode.eq_ignore_ascii_case("both") {
            format!("{} [{}]", case.name, self.mode.as_str())
        } else {
            case.name.clone()
        };
        VerificationResult {
            case_name,
            section: case.section.clone(),
            mode: self.mode.as_str().to_string(),
            passed,
            expected: case.expected_output.clone(),
            actual,
            expected_count: case.expected_count,
            actual_count: run.count,
            error,
            repairs: run.repairs,
            diff,
        }
    }
}

/// Format one case into a byte vector under `mode`.
#[must_use]
pub fn execute(case: &FixtureCase, mode: ArgMode) -> Execution {
    let args = case.engine_args();
    let template = case.template.as_deref().map(str::as_bytes);
    let mut output = Vec::new();

    let (res, repairs) = match mode {
        ArgMode::Strict => (vprintk(&mut output, template, &mut Args::new(&args)), 0),
        ArgMode::Hardened => {
            let mut source = HealingArgs::new(Args::new(&args));
            let res = vprintk(&mut output, template, &mut source);
            (res, source.repairs())
        }
    };
    let (count, error) = match res {
        Ok(n) => (n, None),
        Err(FormatError { emitted, cause }) => (emitted, Some(cause)),
    };
    Execution {
        output,
        count,
        error,
        repairs,
    }
}

fn mode_matches(active: ArgMode, case_mode: &str) -> bool {
    case_mode.eq_ignore_ascii_case("both") || case_mode.eq_ignore_ascii_case(active.as_str())
}

/// Stable fixture name for an argument error.
#[must_use]
pub fn error_label(err: &ArgError) -> &'static str {
    match err {
        ArgError::Exhausted { .. } => "exhausted",
        ArgError::Mismatch { .. } => "mismatch",
    }
}
