//! Argument handling mode.
//!
//! - `strict` (default): a missing or mistyped argument stops the call and is
//!   returned as a [`FormatError`](crate::FormatError).
//! - `hardened`: the argument is replaced by a safe default and formatting
//!   continues. The call always succeeds.

/// How a formatting call treats an argument it cannot take.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgMode {
    #[default]
    Strict,
    Hardened,
}

impl ArgMode {
    /// Parse from string (case-insensitive). Unknown values map to `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        let s = s.trim();
        if ["hardened", "repair", "heal", "lenient"]
            .iter()
            .any(|name| s.eq_ignore_ascii_case(name))
        {
            Self::Hardened
        } else {
            Self::Strict
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
        }
    }

    /// Returns true if bad arguments are replaced instead of reported.
    #[must_use]
    pub const fn heals(self) -> bool {
        matches!(self, Self::Hardened)
    }
}
