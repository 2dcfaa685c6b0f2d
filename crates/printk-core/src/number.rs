//! Integer rendering.
//!
//! Converts a 32-bit value to digits in base 8, 10 or 16 and streams it to a
//! sink with sign, `#` prefix, field width and minimum-digit precision
//! applied. Digits are produced into a small stack buffer; nothing else is
//! stored.

use crate::flags::{Base, FormatFlags};
use crate::sink::Sink;

const SMALL_DIGITS: &[u8; 16] = b"0123456789abcdef";
const LARGE_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Octal of `u32::MAX` is 11 digits.
const MAX_DIGITS: usize = 11;

/// Divides `n` in place and returns the remainder.
///
/// The constant-divisor arms let targets without a divide instruction use
/// shifts and multiplies.
#[inline]
fn divide(n: &mut u32, base: Base) -> u32 {
    let rem;
    match base {
        Base::Octal => {
            rem = *n % 8;
            *n /= 8;
        }
        Base::Hex => {
            rem = *n % 16;
            *n /= 16;
        }
        Base::Decimal => {
            rem = *n % 10;
            *n /= 10;
        }
    }
    rem
}

#[inline]
fn emit<S: Sink + ?Sized>(sink: &mut S, byte: u8, nbr: &mut usize) {
    sink.put(byte);
    *nbr += 1;
}

/// Renders `num` and returns the number of bytes emitted.
///
/// Without `flags.signed` the value is printed as its unsigned 32-bit
/// reinterpretation and no sign is ever shown. `width` and `precision` may be
/// negative; a non-positive budget simply produces no padding.
pub fn render_number<S: Sink + ?Sized>(
    sink: &mut S,
    num: i32,
    base: Base,
    mut width: i32,
    mut precision: i32,
    mut flags: FormatFlags,
) -> usize {
    let mut nbr = 0;

    if flags.left_justify {
        flags.zero_pad = false;
    }
    if flags.alt_form {
        width = width.saturating_sub(base.prefix_len());
    }

    let mut sign = None;
    let mut magnitude = num as u32;
    if flags.signed {
        if num < 0 {
            magnitude = num.unsigned_abs();
            sign = Some(b'-');
        } else if flags.force_sign {
            sign = Some(b'+');
        } else if flags.space_sign {
            sign = Some(b' ');
        }
    }

    let digits = if flags.uppercase {
        LARGE_DIGITS
    } else {
        SMALL_DIGITS
    };
    let mut tmp = [0u8; MAX_DIGITS];
    let mut len = 0;
    loop {
        tmp[len] = digits[divide(&mut magnitude, base) as usize];
        len += 1;
        if magnitude == 0 {
            break;
        }
    }

    // len <= MAX_DIGITS, so the cast is lossless.
    let digit_count = len as i32;
    if precision < digit_count {
        precision = digit_count;
    }
    width = width.saturating_sub(precision);

    if !flags.left_justify && !flags.zero_pad {
        if width > 0 && sign.is_some() {
            width -= 1;
        }
        while width > 0 {
            emit(sink, b' ', &mut nbr);
            width -= 1;
        }
    }
    if let Some(s) = sign {
        emit(sink, s, &mut nbr);
        width = width.saturating_sub(1);
    }
    if flags.alt_form {
        match base {
            Base::Octal => emit(sink, b'0', &mut nbr),
            Base::Hex => {
                emit(sink, b'0', &mut nbr);
                emit(sink, if flags.uppercase { b'X' } else { b'x' }, &mut nbr);
            }
            Base::Decimal => {}
        }
    }
    if !flags.left_justify && flags.zero_pad {
        while width > 0 {
            emit(sink, b'0', &mut nbr);
            width -= 1;
        }
    }
    while digit_count < precision {
        emit(sink, b'0', &mut nbr);
        precision -= 1;
    }
    while len > 0 {
        len -= 1;
        emit(sink, tmp[len], &mut nbr);
    }
    while width > 0 {
        emit(sink, b' ', &mut nbr);
        width -= 1;
    }

    nbr
}
