//! Error types.
//!
//! Template problems are never errors: unknown conversions are echoed and
//! out-of-range widths are clamped. The only failure is an argument source
//! that cannot supply the value a directive asks for.

use thiserror::Error;

use crate::args::ArgKind;

/// Failure to take the next argument from an [`ArgSource`](crate::ArgSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("argument {index} missing, expected {expected}")]
    Exhausted { index: usize, expected: ArgKind },
    #[error("argument {index} is {found}, expected {expected}")]
    Mismatch {
        index: usize,
        expected: ArgKind,
        found: ArgKind,
    },
}

impl ArgError {
    /// Zero-based position of the offending argument.
    #[must_use]
    pub const fn index(&self) -> usize {
        match *self {
            Self::Exhausted { index, .. } | Self::Mismatch { index, .. } => index,
        }
    }

    /// The kind the directive asked for.
    #[must_use]
    pub const fn expected(&self) -> ArgKind {
        match *self {
            Self::Exhausted { expected, .. } | Self::Mismatch { expected, .. } => expected,
        }
    }
}

/// A formatting call stopped by an argument error.
///
/// `emitted` counts the bytes already delivered to the sink before the error,
/// so callers can still account for partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("formatting stopped after {emitted} bytes: {cause}")]
pub struct FormatError {
    pub emitted: usize,
    #[source]
    pub cause: ArgError,
}
