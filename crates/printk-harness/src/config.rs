//! Harness configuration.
//!
//! The argument mode is read from the `PRINTK_ARG_MODE` environment variable
//! (`strict` or `hardened`, default `strict`) on first use and cached. A mode
//! given on the command line takes precedence.

use std::sync::atomic::{AtomicU8, Ordering};

use printk_core::ArgMode;

/// Environment variable selecting the default argument mode.
pub const MODE_ENV: &str = "PRINTK_ARG_MODE";

// 0=unresolved, 1=Strict, 2=Hardened.
static CACHED_MODE: AtomicU8 = AtomicU8::new(0);

const MODE_UNRESOLVED: u8 = 0;
const MODE_STRICT: u8 = 1;
const MODE_HARDENED: u8 = 2;

fn mode_to_u8(mode: ArgMode) -> u8 {
    match mode {
        ArgMode::Strict => MODE_STRICT,
        ArgMode::Hardened => MODE_HARDENED,
    }
}

fn u8_to_mode(v: u8) -> ArgMode {
    match v {
        MODE_HARDENED => ArgMode::Hardened,
        _ => ArgMode::Strict,
    }
}

/// The mode configured through the environment.
#[must_use]
pub fn env_mode() -> ArgMode {
    let cached = CACHED_MODE.load(Ordering::Acquire);
    if cached != MODE_UNRESOLVED {
        return u8_to_mode(cached);
    }
    let mode = std::env::var(MODE_ENV)
        .map(|v| ArgMode::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_MODE.store(mode_to_u8(mode), Ordering::Release);
    mode
}

/// Which modes a verification run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    Only(ArgMode),
    Both,
}

impl ModeSelection {
    /// Parse a CLI value. `None` falls back to the environment.
    #[must_use]
    pub fn resolve(cli: Option<&str>) -> Self {
        match cli {
            Some(s) if s.eq_ignore_ascii_case("both") => Self::Both,
            Some(s) => Self::Only(ArgMode::from_str_loose(s)),
            None => Self::Only(env_mode()),
        }
    }

    #[must_use]
    pub fn modes(self) -> &'static [ArgMode] {
        match self {
            Self::Only(ArgMode::Strict) => &[ArgMode::Strict],
            Self::Only(ArgMode::Hardened) => &[ArgMode::Hardened],
            Self::Both => &[ArgMode::Strict, ArgMode::Hardened],
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Only(mode) => mode.as_str(),
            Self::Both => "strict+hardened",
        }
    }
}
