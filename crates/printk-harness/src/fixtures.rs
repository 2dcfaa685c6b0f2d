//! Fixture loading and management.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use printk_core::Arg;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// One typed argument of a fixture case.
///
/// Serialized externally tagged: `{"int": -5}`, `{"str": null}`, `{"ptr": 4096}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureArg {
    Int(i32),
    Uint(u32),
    Char(char),
    Str(Option<String>),
    Ptr(u64),
}

impl FixtureArg {
    /// Borrow this argument as an engine argument.
    #[must_use]
    pub fn to_arg(&self) -> Arg<'_> {
        match self {
            Self::Int(v) => Arg::Int(*v),
            Self::Uint(v) => Arg::Uint(*v),
            Self::Char(c) => Arg::from(*c),
            Self::Str(s) => Arg::Str(s.as_deref().map(str::as_bytes)),
            // Addresses wider than the host pointer keep their low bits.
            Self::Ptr(p) => Arg::Ptr(*p as usize),
        }
    }
}

/// Command-line form: `int:-5`, `uint:7`, `char:A`, `str:hello`, `null`,
/// `ptr:0x1000`.
impl FromStr for FixtureArg {
    type Err = HarnessError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let bad = || HarnessError::BadArgSpec(spec.to_string());
        if spec == "null" {
            return Ok(Self::Str(None));
        }
        let (kind, value) = spec.split_once(':').ok_or_else(bad)?;
        match kind {
            "int" | "d" => value.trim().parse().map(Self::Int).map_err(|_| bad()),
            "uint" | "u" => parse_unsigned(value).map(Self::Uint).ok_or_else(bad),
            "char" | "c" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(bad()),
                }
            }
            "str" | "s" => Ok(Self::Str(Some(value.to_string()))),
            "ptr" | "p" => parse_unsigned(value).map(Self::Ptr).ok_or_else(bad),
            _ => Err(bad()),
        }
    }
}

fn parse_unsigned<T: TryFrom<u64>>(value: &str) -> Option<T> {
    let value = value.trim();
    let raw = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => value.parse().ok()?,
    };
    T::try_from(raw).ok()
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Behaviour being exercised (e.g. "flags", "width", "hooks").
    pub section: String,
    /// Format template; `null` exercises the absent-template path.
    pub template: Option<String>,
    /// Argument sequence in consumption order.
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Bytes the sink must receive.
    pub expected_output: String,
    /// Count returned by the call (or carried by the error).
    pub expected_count: usize,
    /// `strict`, `hardened` or `both`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Argument error expected in strict mode: `exhausted` or `mismatch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<String>,
}

fn default_mode() -> String {
    String::from("both")
}

impl FixtureCase {
    /// Engine arguments borrowed from this case.
    #[must_use]
    pub fn engine_args(&self) -> Vec<Arg<'_>> {
        self.args.iter().map(FixtureArg::to_arg).collect()
    }
}

/// A collection of fixture cases for one behaviour family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// Fixture files under `path`: the file itself, or every `*.json` in the
/// directory, sorted by name.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        if p.extension().is_some_and(|ext| ext == "json") {
            files.push(p);
        }
    }
    if files.is_empty() {
        return Err(HarnessError::NoFixtures(path.display().to_string()));
    }
    files.sort();
    Ok(files)
}
