//! Typed argument sources.
//!
//! A directive pulls its argument through [`ArgSource`], asking for the
//! kind it needs. Unlike a C `va_list`, a source that runs dry or holds a
//! value of the wrong kind reports an [`ArgError`] instead of yielding
//! whatever happens to be next in memory.

use core::fmt;

use crate::error::ArgError;

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Signed 32-bit integer.
    Int(i32),
    /// Unsigned 32-bit integer.
    Uint(u32),
    /// A single byte for `%c`.
    Char(u8),
    /// Byte string for `%s`. `None` is the null pointer.
    Str(Option<&'a [u8]>),
    /// Address for `%p`.
    Ptr(usize),
}

impl Arg<'_> {
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Int(_) => ArgKind::Int,
            Self::Uint(_) => ArgKind::Uint,
            Self::Char(_) => ArgKind::Char,
            Self::Str(_) => ArgKind::Str,
            Self::Ptr(_) => ArgKind::Ptr,
        }
    }
}

/// Discriminant of an [`Arg`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Int,
    Uint,
    Char,
    Str,
    Ptr,
}

impl ArgKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Uint => "unsigned int",
            Self::Char => "char",
            Self::Str => "string",
            Self::Ptr => "pointer",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! arg_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            #[inline]
            fn from(v: $t) -> Self {
                Self::Int(i32::from(v))
            }
        })*
    };
}

macro_rules! arg_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            #[inline]
            fn from(v: $t) -> Self {
                Self::Uint(u32::from(v))
            }
        })*
    };
}

arg_from_signed!(i8, i16, i32);
arg_from_unsigned!(u8, u16, u32);

/// Only the low byte of the code point is kept.
impl From<char> for Arg<'_> {
    #[inline]
    fn from(c: char) -> Self {
        Self::Char(c as u8)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    #[inline]
    fn from(s: &'a [u8]) -> Self {
        Self::Str(Some(s))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    #[inline]
    fn from(s: &'a [u8; N]) -> Self {
        Self::Str(Some(s.as_slice()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    #[inline]
    fn from(s: Option<&'a str>) -> Self {
        Self::Str(s.map(str::as_bytes))
    }
}

impl<T> From<*const T> for Arg<'_> {
    #[inline]
    fn from(p: *const T) -> Self {
        Self::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    #[inline]
    fn from(p: *mut T) -> Self {
        Self::Ptr(p as usize)
    }
}

/// Sequential, typed supply of formatting arguments.
pub trait ArgSource<'a> {
    /// Next argument as a 32-bit integer (`%c`, `%d`, `%u`, `*` widths, ...).
    fn next_int(&mut self) -> Result<i32, ArgError>;

    /// Next argument as a possibly-null byte string.
    fn next_str(&mut self) -> Result<Option<&'a [u8]>, ArgError>;

    /// Next argument as an address.
    fn next_ptr(&mut self) -> Result<usize, ArgError>;
}

impl<'a, A: ArgSource<'a> + ?Sized> ArgSource<'a> for &mut A {
    fn next_int(&mut self) -> Result<i32, ArgError> {
        (**self).next_int()
    }

    fn next_str(&mut self) -> Result<Option<&'a [u8]>, ArgError> {
        (**self).next_str()
    }

    fn next_ptr(&mut self) -> Result<usize, ArgError> {
        (**self).next_ptr()
    }
}

/// Cursor over a caller-supplied argument slice.
#[derive(Debug, Clone)]
pub struct Args<'a> {
    args: &'a [Arg<'a>],
    pos: usize,
}

impl<'a> Args<'a> {
    #[must_use]
    pub const fn new(args: &'a [Arg<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    /// Number of arguments taken so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.pos
    }

    /// Number of arguments not yet taken.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }

    fn take(&mut self, expected: ArgKind) -> Result<Arg<'a>, ArgError> {
        let index = self.pos;
        let arg = *self
            .args
            .get(index)
            .ok_or(ArgError::Exhausted { index, expected })?;
        self.pos += 1;
        Ok(arg)
    }
}

impl<'a> ArgSource<'a> for Args<'a> {
    fn next_int(&mut self) -> Result<i32, ArgError> {
        let index = self.pos;
        match self.take(ArgKind::Int)? {
            Arg::Int(v) => Ok(v),
            Arg::Uint(v) => Ok(v as i32),
            Arg::Char(c) => Ok(i32::from(c)),
            other => Err(ArgError::Mismatch {
                index,
                expected: ArgKind::Int,
                found: other.kind(),
            }),
        }
    }

    fn next_str(&mut self) -> Result<Option<&'a [u8]>, ArgError> {
        let index = self.pos;
        match self.take(ArgKind::Str)? {
            Arg::Str(s) => Ok(s),
            other => Err(ArgError::Mismatch {
                index,
                expected: ArgKind::Str,
                found: other.kind(),
            }),
        }
    }

    fn next_ptr(&mut self) -> Result<usize, ArgError> {
        let index = self.pos;
        match self.take(ArgKind::Ptr)? {
            Arg::Ptr(p) => Ok(p),
            Arg::Str(s) => Ok(s.map_or(0, |s| s.as_ptr() as usize)),
            other => Err(ArgError::Mismatch {
                index,
                expected: ArgKind::Ptr,
                found: other.kind(),
            }),
        }
    }
}

/// Source adapter that never fails.
///
/// A missing or mismatched argument is replaced by a safe default (zero, the
/// null string, the null address) and counted, so a bad call site still
/// produces a complete line.
#[derive(Debug)]
pub struct HealingArgs<A> {
    inner: A,
    repairs: usize,
    first_error: Option<ArgError>,
}

impl<A> HealingArgs<A> {
    #[must_use]
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            repairs: 0,
            first_error: None,
        }
    }

    /// Number of arguments replaced by a default.
    #[must_use]
    pub const fn repairs(&self) -> usize {
        self.repairs
    }

    /// The first error that was healed, if any.
    #[must_use]
    pub const fn first_error(&self) -> Option<ArgError> {
        self.first_error
    }

    pub fn into_inner(self) -> A {
        self.inner
    }

    fn heal<T>(&mut self, res: Result<T, ArgError>, default: T) -> T {
        res.unwrap_or_else(|err| {
            self.repairs += 1;
            self.first_error.get_or_insert(err);
            default
        })
    }
}

impl<'a, A: ArgSource<'a>> ArgSource<'a> for HealingArgs<A> {
    fn next_int(&mut self) -> Result<i32, ArgError> {
        let res = self.inner.next_int();
        Ok(self.heal(res, 0))
    }

    fn next_str(&mut self) -> Result<Option<&'a [u8]>, ArgError> {
        let res = self.inner.next_str();
        Ok(self.heal(res, None))
    }

    fn next_ptr(&mut self) -> Result<usize, ArgError> {
        let res = self.inner.next_ptr();
        Ok(self.heal(res, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_yield_in_order() {
        let list = [Arg::Int(-3), Arg::from("ab"), Arg::Ptr(0x1000)];
        let mut args = Args::new(&list);
        assert_eq!(args.next_int(), Ok(-3));
        assert_eq!(args.next_str(), Ok(Some(&b"ab"[..])));
        assert_eq!(args.next_ptr(), Ok(0x1000));
        assert_eq!(args.consumed(), 3);
        assert_eq!(args.remaining(), 0);
    }

    #[test]
    fn integer_kinds_promote() {
        let list = [Arg::Uint(u32::MAX), Arg::Char(b'A'), Arg::from(-2i8)];
        let mut args = Args::new(&list);
        assert_eq!(args.next_int(), Ok(-1));
        assert_eq!(args.next_int(), Ok(65));
        assert_eq!(args.next_int(), Ok(-2));
    }

    #[test]
    fn exhausted_source_reports_index() {
        let list = [Arg::Int(1)];
        let mut args = Args::new(&list);
        assert_eq!(args.next_int(), Ok(1));
        assert_eq!(
            args.next_str(),
            Err(ArgError::Exhausted {
                index: 1,
                expected: ArgKind::Str
            })
        );
        assert_eq!(args.consumed(), 1);
    }

    #[test]
    fn mismatch_consumes_the_argument() {
        let list = [Arg::Ptr(8), Arg::Int(4)];
        let mut args = Args::new(&list);
        let err = args.next_int().unwrap_err();
        assert_eq!(
            err,
            ArgError::Mismatch {
                index: 0,
                expected: ArgKind::Int,
                found: ArgKind::Ptr
            }
        );
        assert_eq!(err.index(), 0);
        assert_eq!(args.next_int(), Ok(4));
    }

    #[test]
    fn string_satisfies_pointer_request() {
        let s: &[u8] = b"xyz";
        let list = [Arg::Str(Some(s)), Arg::Str(None)];
        let mut args = Args::new(&list);
        assert_eq!(args.next_ptr(), Ok(s.as_ptr() as usize));
        assert_eq!(args.next_ptr(), Ok(0));
    }

    #[test]
    fn healing_substitutes_defaults() {
        let list = [Arg::Str(Some(b"s")), Arg::Int(7)];
        let mut args = HealingArgs::new(Args::new(&list));
        assert_eq!(args.next_int(), Ok(0));
        assert_eq!(args.next_int(), Ok(7));
        assert_eq!(args.next_str(), Ok(None));
        assert_eq!(args.next_ptr(), Ok(0));
        assert_eq!(args.repairs(), 3);
        assert_eq!(
            args.first_error(),
            Some(ArgError::Mismatch {
                index: 0,
                expected: ArgKind::Int,
                found: ArgKind::Str
            })
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(ArgKind::Uint.as_str(), "unsigned int");
        assert_eq!(std::format!("{}", ArgKind::Ptr), "pointer");
    }
}
