//! Directive descriptor types.

/// Width or precision that was not given in the directive.
pub const UNSPECIFIED: i32 = -1;

/// Flags of one directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub zero_pad: bool,     // '0'
    pub signed: bool,       // set by 'd' / 'i'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub left_justify: bool, // '-'
    pub alt_form: bool,     // '#'
    pub uppercase: bool,    // set by 'X'
}

impl FormatFlags {
    /// Applies a flag character. Returns false if `c` is not a flag.
    #[inline]
    pub fn set_from_byte(&mut self, c: u8) -> bool {
        match c {
            b'-' => self.left_justify = true,
            b'+' => self.force_sign = true,
            b' ' => self.space_sign = true,
            b'#' => self.alt_form = true,
            b'0' => self.zero_pad = true,
            _ => return false,
        }
        true
    }
}

/// Numeric base of an integer conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Base {
    Octal,
    #[default]
    Decimal,
    Hex,
}

impl Base {
    #[inline]
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }

    /// Columns taken by the `#` prefix.
    #[inline]
    #[must_use]
    pub const fn prefix_len(self) -> i32 {
        match self {
            Self::Octal => 1,
            Self::Decimal => 0,
            Self::Hex => 2,
        }
    }
}

/// Length qualifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthMod {
    #[default]
    None,
    H, // 'h'
    L, // 'l'
}

/// A fully resolved directive, minus its conversion.
///
/// `width` and `precision` are [`UNSPECIFIED`] when absent. After resolution
/// `width` is never negative and a given precision is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: i32,
    pub precision: i32,
    pub length: LengthMod,
    pub base: Base,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            flags: FormatFlags::default(),
            width: UNSPECIFIED,
            precision: UNSPECIFIED,
            length: LengthMod::None,
            base: Base::Decimal,
        }
    }
}
