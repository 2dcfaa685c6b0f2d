//! CLI entrypoint for the printk conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use printk_core::console::Console;
use printk_harness::config::ModeSelection;
use printk_harness::report::FixtureDigest;
use printk_harness::structured_log::{self, LogEmitter, LogEntry, LogLevel};
use printk_harness::verify::VerificationSummary;
use printk_harness::{ConformanceReport, FixtureArg, FixtureSet, HarnessError, TestRunner};

/// Conformance tooling for printk.
#[derive(Debug, Parser)]
#[command(name = "printk-harness")]
#[command(about = "Conformance testing harness for printk")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long, default_value = "tests/conformance")]
        fixture: PathBuf,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (JSON).
        #[arg(long)]
        json: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// `strict`, `hardened` or `both` (default: $PRINTK_ARG_MODE, else strict).
        #[arg(long)]
        mode: Option<String>,
    },
    /// Format one template to stdout.
    Render {
        /// Format template.
        template: String,
        /// Argument as kind:value (int:-5, uint:7, char:A, str:abc, null, ptr:0x1000).
        #[arg(long = "arg", short = 'a')]
        args: Vec<FixtureArg>,
        /// Append a newline to the template.
        #[arg(long, short = 'n')]
        newline: bool,
        /// `strict` or `hardened` (default: $PRINTK_ARG_MODE, else strict).
        #[arg(long)]
        mode: Option<String>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        #[arg(long)]
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            json,
            log,
            mode,
        } => {
            let selection = ModeSelection::resolve(mode.as_deref());
            eprintln!(
                "Verifying against fixtures in {} ({})",
                fixture.display(),
                selection.label()
            );

            let mut sets = Vec::new();
            let mut digests = Vec::new();
            for path in printk_harness::fixtures::discover(&fixture)? {
                match FixtureSet::from_file(&path) {
                    Ok(set) => {
                        digests.push(FixtureDigest::of_file(&path, set.cases.len())?);
                        sets.push(set);
                    }
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if sets.is_empty() {
                return Err(HarnessError::NoFixtures(fixture.display().to_string()).into());
            }

            let mut results = Vec::new();
            for &mode in selection.modes() {
                let runner = TestRunner::new("fixture-verify", mode);
                for set in &sets {
                    results.extend(runner.run(set));
                }
            }
            let summary = VerificationSummary::from_results(results);

            if let Some(path) = &log {
                let mut emitter = LogEmitter::to_file(path, "printk", "fixture-verify")?;
                emitter.emit(LogLevel::Info, "run_start")?;
                for r in &summary.results {
                    emitter.emit_entry(LogEntry::for_result(r))?;
                }
                let level = if summary.all_passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                };
                emitter.emit_entry(
                    LogEntry::new(String::new(), level, "run_end").with_details(
                        serde_json::json!({
                            "total": summary.total,
                            "passed": summary.passed,
                            "failed": summary.failed,
                        }),
                    ),
                )?;
                emitter.flush()?;
            }

            let report_doc = ConformanceReport {
                title: String::from("printk conformance"),
                mode: selection.label().to_string(),
                timestamp: structured_log::now_utc(),
                fixtures: digests,
                summary,
            };
            if let Some(path) = &report {
                std::fs::write(path, report_doc.to_markdown())?;
                eprintln!("Wrote {}", path.display());
            }
            if let Some(path) = &json {
                std::fs::write(path, report_doc.to_json())?;
                eprintln!("Wrote {}", path.display());
            }

            let summary = &report_doc.summary;
            for r in summary.failures() {
                eprintln!("FAIL {}", r.case_name);
                if let Some(diff) = &r.diff {
                    eprintln!("{diff}");
                }
            }
            eprintln!(
                "Results: {} passed, {} failed, {} total",
                summary.passed, summary.failed, summary.total
            );
            if !summary.all_passed() {
                return Err(HarnessError::VerificationFailed {
                    failed: summary.failed,
                    total: summary.total,
                }
                .into());
            }
        }
        Command::Render {
            mut template,
            args,
            newline,
            mode,
        } => {
            if newline {
                template.push('\n');
            }
            let mode = match ModeSelection::resolve(mode.as_deref()) {
                ModeSelection::Only(mode) => mode,
                ModeSelection::Both => return Err("render takes a single mode".into()),
            };
            let engine_args: Vec<_> = args.iter().map(FixtureArg::to_arg).collect();
            let console = Console::new(std::io::stdout());
            let n = console
                .print(template.as_bytes(), &engine_args, mode)
                .map_err(HarnessError::from)?;
            eprintln!("[{n} bytes, {}]", mode.as_str());
        }
        Command::ValidateLog { path } => {
            let (lines, errors) = structured_log::validate_log_file(&path)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!("{lines} lines, {} errors", errors.len());
            if !errors.is_empty() {
                return Err(format!("{} invalid log fields", errors.len()).into());
            }
        }
    }

    Ok(())
}
