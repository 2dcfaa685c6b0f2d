//! Conformance testing harness for printk.
//!
//! This crate provides:
//! - Fixtures: templates, typed arguments and expected output as JSON
//! - Verification: run fixtures through the engine in strict and hardened mode
//! - Report generation: markdown + JSON conformance reports with fixture digests
//! - Structured logging: one JSONL record per verified case

#![forbid(unsafe_code)]

pub mod config;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
