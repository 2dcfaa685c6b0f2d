//! Harness error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument spec `{0}` (expected kind:value, e.g. int:42, str:abc, null)")]
    BadArgSpec(String),
    #[error("no fixture JSON files found in {0}")]
    NoFixtures(String),
    #[error(transparent)]
    Format(#[from] printk_core::FormatError),
    #[error("{failed} of {total} cases failed")]
    VerificationFailed { failed: usize, total: usize },
}
