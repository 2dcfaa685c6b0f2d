//! Format template interpreter.
//!
//! Scans the template byte by byte. Literal bytes go straight to the sink;
//! each `%` directive is resolved completely (flags, width, precision,
//! qualifier) before its conversion runs. Integer and pointer conversions are
//! handed to [`render_number`].
//!
//! ```text
//! directive := '%' flags* width? ('.' precision)? qualifier? conv
//! flags     := '-' | '+' | ' ' | '#' | '0'
//! width     := digit+ | '*'
//! precision := digit+ | '*'
//! qualifier := 'h' | 'l'
//! conv      := 'c' | 's' | 'p' | '%' | 'o' | 'x' | 'X' | 'd' | 'i' | 'u'
//! ```
//!
//! The template ends at its first NUL byte or at the end of the slice,
//! whichever comes first.

use crate::args::{Arg, ArgSource, Args, HealingArgs};
use crate::config::ArgMode;
use crate::error::{ArgError, FormatError};
use crate::flags::{Base, FormatSpec, LengthMod, UNSPECIFIED};
use crate::number::render_number;
use crate::sink::Sink;

/// Substituted for a null `%s` argument.
const NULL_STR: &[u8] = b"(NULL)";

/// Read position in the template. Only ever moves forward.
struct Cursor<'t> {
    fmt: &'t [u8],
    pos: usize,
}

impl<'t> Cursor<'t> {
    const fn new(fmt: &'t [u8]) -> Self {
        Self { fmt, pos: 0 }
    }

    /// Current byte, or `0` at the terminator.
    #[inline]
    fn peek(&self) -> u8 {
        self.fmt.get(self.pos).copied().unwrap_or(0)
    }

    /// Steps over the current byte. Never steps past the terminator.
    #[inline]
    fn bump(&mut self) {
        if self.peek() != 0 {
            self.pos += 1;
        }
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.peek() == 0
    }
}

/// Reads a run of decimal digits, saturating at `i32::MAX`.
fn parse_decimal(cur: &mut Cursor<'_>) -> i32 {
    let mut value = 0_i32;
    while cur.peek().is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(i32::from(cur.peek() - b'0'));
        cur.bump();
    }
    value
}

/// Parses everything between `%` and the conversion byte.
///
/// `*` fields take their value from `args` in template order.
fn parse_spec<'a, A: ArgSource<'a> + ?Sized>(
    cur: &mut Cursor<'_>,
    args: &mut A,
) -> Result<FormatSpec, ArgError> {
    let mut spec = FormatSpec::default();

    while spec.flags.set_from_byte(cur.peek()) {
        cur.bump();
    }

    if cur.peek().is_ascii_digit() {
        spec.width = parse_decimal(cur);
    } else if cur.peek() == b'*' {
        cur.bump();
        let width = args.next_int()?;
        if width < 0 {
            spec.width = width.saturating_neg();
            spec.flags.left_justify = true;
        } else {
            spec.width = width;
        }
    }

    if cur.peek() == b'.' {
        cur.bump();
        spec.precision = 0;
        if cur.peek().is_ascii_digit() {
            spec.precision = parse_decimal(cur);
        } else if cur.peek() == b'*' {
            cur.bump();
            spec.precision = args.next_int()?;
        }
        if spec.precision < 0 {
            spec.precision = 0;
        }
    }

    match cur.peek() {
        b'h' => {
            spec.length = LengthMod::H;
            cur.bump();
        }
        b'l' => {
            spec.length = LengthMod::L;
            cur.bump();
        }
        _ => {}
    }

    if spec.flags.left_justify {
        spec.flags.zero_pad = false;
    }

    Ok(spec)
}

/// Counts bytes delivered to the sink during one call.
struct Emitter<'s, S: ?Sized> {
    sink: &'s mut S,
    nbr: usize,
}

impl<S: Sink + ?Sized> Emitter<'_, S> {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.sink.put(byte);
        self.nbr += 1;
    }

    fn pad(&mut self, byte: u8, mut count: i32) {
        while count > 0 {
            self.put(byte);
            count -= 1;
        }
    }
}

fn put_char<'a, S, A>(
    out: &mut Emitter<'_, S>,
    spec: FormatSpec,
    args: &mut A,
) -> Result<(), ArgError>
where
    S: Sink + ?Sized,
    A: ArgSource<'a> + ?Sized,
{
    let width = spec.width.saturating_sub(1);
    let c = args.next_int()?;
    if !spec.flags.left_justify {
        out.pad(b' ', width);
        out.put(c as u8);
    } else {
        out.put(c as u8);
        out.pad(b' ', width);
    }
    Ok(())
}

fn put_str<'a, S, A>(
    out: &mut Emitter<'_, S>,
    spec: FormatSpec,
    args: &mut A,
) -> Result<(), ArgError>
where
    S: Sink + ?Sized,
    A: ArgSource<'a> + ?Sized,
{
    let s = args.next_str()?.unwrap_or(NULL_STR);
    let s = s.iter().position(|&b| b == 0).map_or(s, |nul| &s[..nul]);

    let mut len = i32::try_from(s.len()).unwrap_or(i32::MAX);
    if len > spec.precision && spec.precision > 0 {
        len = spec.precision;
    }
    let padding = spec.width.saturating_sub(len);

    if !spec.flags.left_justify {
        out.pad(b' ', padding);
    }
    for &b in s.iter().take(len as usize) {
        out.put(b);
    }
    if spec.flags.left_justify {
        out.pad(b' ', padding);
    }
    Ok(())
}

fn put_number<'a, S, A>(
    out: &mut Emitter<'_, S>,
    spec: FormatSpec,
    args: &mut A,
) -> Result<(), ArgError>
where
    S: Sink + ?Sized,
    A: ArgSource<'a> + ?Sized,
{
    let mut num = args.next_int()?;
    if spec.length == LengthMod::H && spec.flags.signed {
        num = i32::from(num as i16);
    }
    out.nbr += render_number(
        &mut *out.sink,
        num,
        spec.base,
        spec.width,
        spec.precision,
        spec.flags,
    );
    Ok(())
}

fn put_pointer<'a, S, A>(
    out: &mut Emitter<'_, S>,
    mut spec: FormatSpec,
    args: &mut A,
) -> Result<(), ArgError>
where
    S: Sink + ?Sized,
    A: ArgSource<'a> + ?Sized,
{
    if spec.width == UNSPECIFIED {
        spec.width = (core::mem::size_of::<usize>() * 2) as i32;
        spec.flags.zero_pad = true;
    }
    // The renderer works on 32 bits; wider addresses keep their low half.
    let addr = args.next_ptr()? as u32 as i32;
    out.nbr += render_number(
        &mut *out.sink,
        addr,
        Base::Hex,
        spec.width,
        spec.precision,
        spec.flags,
    );
    Ok(())
}

/// Interprets one directive. The cursor is on the byte after `%`.
fn directive<'a, S, A>(
    out: &mut Emitter<'_, S>,
    cur: &mut Cursor<'_>,
    args: &mut A,
) -> Result<(), ArgError>
where
    S: Sink + ?Sized,
    A: ArgSource<'a> + ?Sized,
{
    let mut spec = parse_spec(cur, args)?;
    let conv = cur.peek();
    // At the terminator this is a no-op, so the scan loop sees the end.
    cur.bump();

    match conv {
        b'c' => put_char(out, spec, args),
        b's' => put_str(out, spec, args),
        b'p' => put_pointer(out, spec, args),
        b'%' => {
            out.put(b'%');
            Ok(())
        }
        b'o' | b'x' | b'X' | b'd' | b'i' | b'u' => {
            match conv {
                b'o' => spec.base = Base::Octal,
                b'x' => spec.base = Base::Hex,
                b'X' => {
                    spec.base = Base::Hex;
                    spec.flags.uppercase = true;
                }
                b'd' | b'i' => spec.flags.signed = true,
                _ => {}
            }
            put_number(out, spec, args)
        }
        0 => {
            out.put(b'%');
            Ok(())
        }
        other => {
            out.put(b'%');
            out.put(other);
            Ok(())
        }
    }
}

/// Formats `fmt` with arguments from `args` into `sink`.
///
/// Returns the number of bytes delivered. A `None` template returns `Ok(0)`
/// without touching the sink. Otherwise `enter` and `leave` are each called
/// exactly once, also when an argument error stops the scan early.
pub fn vprintk<'a, S, A>(
    sink: &mut S,
    fmt: Option<&[u8]>,
    args: &mut A,
) -> Result<usize, FormatError>
where
    S: Sink + ?Sized,
    A: ArgSource<'a> + ?Sized,
{
    let Some(fmt) = fmt else {
        return Ok(0);
    };

    sink.enter();
    let mut out = Emitter { sink, nbr: 0 };
    let mut cur = Cursor::new(fmt);
    let mut result = Ok(());

    while !cur.at_end() {
        let c = cur.peek();
        cur.bump();
        if c != b'%' {
            out.put(c);
            continue;
        }
        if let Err(cause) = directive(&mut out, &mut cur, args) {
            result = Err(cause);
            break;
        }
    }

    let nbr = out.nbr;
    out.sink.leave();
    result
        .map(|()| nbr)
        .map_err(|cause| FormatError { emitted: nbr, cause })
}

/// Formats `fmt` with a slice of arguments. See [`vprintk`].
pub fn printk<S: Sink + ?Sized>(
    sink: &mut S,
    fmt: Option<&[u8]>,
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    vprintk(sink, fmt, &mut Args::new(args))
}

/// Like [`printk`], with bad arguments handled according to `mode`.
///
/// In [`ArgMode::Hardened`] the call cannot fail.
pub fn printk_with_mode<S: Sink + ?Sized>(
    sink: &mut S,
    fmt: Option<&[u8]>,
    args: &[Arg<'_>],
    mode: ArgMode,
) -> Result<usize, FormatError> {
    match mode {
        ArgMode::Strict => printk(sink, fmt, args),
        ArgMode::Hardened => vprintk(sink, fmt, &mut HealingArgs::new(Args::new(args))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgKind;
    use crate::sink::CountingSink;
    use std::string::String;
    use std::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        out: Vec<u8>,
        enters: usize,
        leaves: usize,
    }

    impl Sink for Recorder {
        fn enter(&mut self) {
            assert_eq!(self.enters, self.leaves, "enter while inside a call");
            self.enters += 1;
        }

        fn put(&mut self, byte: u8) {
            assert_eq!(self.enters, self.leaves + 1, "put outside enter/leave");
            self.out.push(byte);
        }

        fn leave(&mut self) {
            self.leaves += 1;
        }
    }

    fn fmt(template: &str, args: &[Arg<'_>]) -> String {
        let mut sink = Recorder::default();
        let n = printk(&mut sink, Some(template.as_bytes()), args).expect("format ok");
        assert_eq!(n, sink.out.len());
        assert_eq!((sink.enters, sink.leaves), (1, 1));
        String::from_utf8(sink.out).expect("ascii output")
    }

    #[test]
    fn literals_pass_through() {
        assert_eq!(fmt("hello, kernel\n", &[]), "hello, kernel\n");
        assert_eq!(fmt("", &[]), "");
    }

    #[test]
    fn documented_examples() {
        assert_eq!(fmt("%5d", &[Arg::Int(42)]), "   42");
        assert_eq!(fmt("%-5d", &[Arg::Int(42)]), "42   ");
        assert_eq!(fmt("%05d", &[Arg::Int(42)]), "00042");
        assert_eq!(fmt("%#x", &[Arg::Int(255)]), "0xff");
        assert_eq!(fmt("%#X", &[Arg::Int(255)]), "0XFF");
        assert_eq!(fmt("%.3s", &[Arg::from("hello")]), "hel");
        assert_eq!(fmt("%s", &[Arg::Str(None)]), "(NULL)");
        assert_eq!(fmt("%%", &[]), "%");
    }

    #[test]
    fn null_template_touches_nothing() {
        let mut sink = CountingSink::default();
        assert_eq!(printk(&mut sink, None, &[Arg::Int(1)]), Ok(0));
        assert_eq!(sink, CountingSink::default());
    }

    #[test]
    fn empty_template_still_brackets() {
        let mut sink = CountingSink::default();
        assert_eq!(printk(&mut sink, Some(b""), &[]), Ok(0));
        assert_eq!((sink.enters, sink.leaves, sink.bytes), (1, 1, 0));
    }

    #[test]
    fn nul_byte_terminates_template() {
        assert_eq!(fmt("abc\0def", &[]), "abc");
    }

    #[test]
    fn percent_consumes_no_argument() {
        assert_eq!(fmt("%%%d%%", &[Arg::Int(7)]), "%7%");
    }

    #[test]
    fn signed_and_unsigned() {
        assert_eq!(fmt("%d %i", &[Arg::Int(-5), Arg::Int(-6)]), "-5 -6");
        assert_eq!(fmt("%u", &[Arg::Int(-1)]), "4294967295");
        assert_eq!(fmt("%x", &[Arg::Int(-1)]), "ffffffff");
        assert_eq!(fmt("%o", &[Arg::Uint(8)]), "10");
        assert_eq!(fmt("%+d % d", &[Arg::Int(3), Arg::Int(3)]), "+3  3");
        assert_eq!(fmt("%+u", &[Arg::Int(3)]), "3");
    }

    #[test]
    fn star_width_and_precision() {
        assert_eq!(fmt("%*d", &[Arg::Int(4), Arg::Int(7)]), "   7");
        assert_eq!(fmt("%*d|", &[Arg::Int(-4), Arg::Int(7)]), "7   |");
        assert_eq!(fmt("%.*d", &[Arg::Int(3), Arg::Int(7)]), "007");
        assert_eq!(fmt("%.*d", &[Arg::Int(-3), Arg::Int(7)]), "7");
        assert_eq!(
            fmt("%*.*s|", &[Arg::Int(6), Arg::Int(2), Arg::from("abc")]),
            "    ab|"
        );
    }

    #[test]
    fn negative_star_width_overrides_zero_pad() {
        assert_eq!(fmt("%0*d|", &[Arg::Int(-4), Arg::Int(7)]), "7   |");
    }

    #[test]
    fn dot_without_digits_is_zero_precision() {
        assert_eq!(fmt("%.d", &[Arg::Int(0)]), "0");
        assert_eq!(fmt("%.s", &[Arg::from("abc")]), "abc");
    }

    #[test]
    fn char_padding() {
        assert_eq!(fmt("%c", &[Arg::Char(b'A')]), "A");
        assert_eq!(fmt("%3c|", &[Arg::from('B')]), "  B|");
        assert_eq!(fmt("%-3c|", &[Arg::Int(67)]), "C  |");
        assert_eq!(fmt("%0c", &[Arg::Int(0x141)]), "A");
    }

    #[test]
    fn string_padding_and_truncation() {
        assert_eq!(fmt("%8s|", &[Arg::from("abc")]), "     abc|");
        assert_eq!(fmt("%-8s|", &[Arg::from("abc")]), "abc     |");
        assert_eq!(fmt("%2s", &[Arg::from("abcdef")]), "abcdef");
        assert_eq!(fmt("%-6.2s|", &[Arg::from("abcdef")]), "ab    |");
        assert_eq!(fmt("%.10s", &[Arg::from("abc")]), "abc");
        assert_eq!(fmt("%8s", &[Arg::Str(None)]), "  (NULL)");
        assert_eq!(fmt("%.2s", &[Arg::Str(None)]), "(N");
    }

    #[test]
    fn string_stops_at_nul() {
        assert_eq!(fmt("[%s]", &[Arg::from(&b"ab\0cd"[..])]), "[ab]");
    }

    #[test]
    fn pointer_defaults_to_native_width() {
        let digits = core::mem::size_of::<usize>() * 2;
        let out = fmt("%p", &[Arg::Ptr(0xbeef)]);
        assert_eq!(out.len(), digits);
        assert!(out.ends_with("beef"));
        assert!(out.trim_end_matches("beef").bytes().all(|b| b == b'0'));

        assert_eq!(fmt("%6p|", &[Arg::Ptr(0xbeef)]), "  beef|");
        assert_eq!(fmt("%-6p|", &[Arg::Ptr(0xbeef)]), "beef  |");
        let alt = fmt("%#p", &[Arg::Ptr(0)]);
        assert_eq!(alt.len(), digits);
        assert!(alt.starts_with("0x0"));
    }

    #[test]
    fn short_qualifier_sign_extends_only_signed() {
        assert_eq!(fmt("%hd", &[Arg::Int(0xffff)]), "-1");
        assert_eq!(fmt("%hd", &[Arg::Int(0x1_8000)]), "-32768");
        assert_eq!(fmt("%hu", &[Arg::Int(0x1_ffff)]), "131071");
        assert_eq!(fmt("%hx", &[Arg::Int(-1)]), "ffffffff");
        assert_eq!(fmt("%ld %lx", &[Arg::Int(-1), Arg::Int(-1)]), "-1 ffffffff");
    }

    #[test]
    fn unknown_conversion_is_echoed() {
        assert_eq!(fmt("%q", &[]), "%q");
        assert_eq!(fmt("%5q|", &[]), "%q|");
        assert_eq!(fmt("%lld", &[Arg::Int(1)]), "%ld");
        assert_eq!(fmt("a%zb", &[]), "a%zb");
    }

    #[test]
    fn truncated_directive_backs_off() {
        assert_eq!(fmt("50%", &[]), "50%");
        assert_eq!(fmt("x%-", &[]), "x%");
        assert_eq!(fmt("x%08.3h", &[]), "x%");
        assert_eq!(fmt("x%\0y", &[]), "x%");
    }

    #[test]
    fn decimal_fields_saturate() {
        let mut cur = Cursor::new(b"99999999999999x");
        assert_eq!(parse_decimal(&mut cur), i32::MAX);
        assert_eq!(cur.peek(), b'x');

        let mut cur = Cursor::new(b"");
        assert_eq!(parse_decimal(&mut cur), 0);
        cur.bump();
        assert!(cur.at_end());
    }

    #[test]
    fn missing_argument_reports_partial_count() {
        let mut sink = Recorder::default();
        let err = printk(&mut sink, Some(b"ab%dcd"), &[]).unwrap_err();
        assert_eq!(err.emitted, 2);
        assert_eq!(
            err.cause,
            ArgError::Exhausted {
                index: 0,
                expected: ArgKind::Int
            }
        );
        assert_eq!(sink.out, b"ab");
        assert_eq!((sink.enters, sink.leaves), (1, 1));
    }

    #[test]
    fn star_width_error_stops_before_output() {
        let mut sink = Recorder::default();
        let err = printk(&mut sink, Some(b"%*s"), &[Arg::from("x")]).unwrap_err();
        assert_eq!(err.emitted, 0);
        assert!(matches!(
            err.cause,
            ArgError::Mismatch {
                index: 0,
                found: ArgKind::Str,
                ..
            }
        ));
        assert_eq!(sink.leaves, 1);
    }

    #[test]
    fn hardened_mode_heals() {
        let mut sink = Recorder::default();
        let n = printk_with_mode(
            &mut sink,
            Some(b"[%d|%s|%p]"),
            &[Arg::from("oops")],
            ArgMode::Hardened,
        )
        .unwrap();
        let digits = core::mem::size_of::<usize>() * 2;
        let mut expected = String::from("[0|(NULL)|");
        expected.extend(core::iter::repeat_n('0', digits));
        expected.push(']');
        assert_eq!(String::from_utf8(sink.out).unwrap(), expected);
        assert_eq!(n, expected.len());
    }

    #[test]
    fn strict_mode_matches_printk() {
        let mut a = CountingSink::default();
        let mut b = CountingSink::default();
        let args = [Arg::Int(1)];
        assert_eq!(
            printk_with_mode(&mut a, Some(b"%d %d"), &args, ArgMode::Strict),
            printk(&mut b, Some(b"%d %d"), &args)
        );
    }

    #[test]
    fn macro_builds_arguments() {
        let mut sink = Recorder::default();
        let n = crate::printk!(&mut sink, "%s=%u (%c)", "irq", 14u32, 'k').unwrap();
        assert_eq!(sink.out, b"irq=14 (k)");
        assert_eq!(n, 10);

        let mut sink = Recorder::default();
        crate::printk!(&mut sink, "plain").unwrap();
        assert_eq!(sink.out, b"plain");
    }
}
