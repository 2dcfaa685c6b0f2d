//! # printk-core
//!
//! Allocation-free formatted output for kernel and interrupt context.
//!
//! A format template and a typed argument sequence are turned into a stream of
//! bytes delivered one at a time to a caller-supplied [`Sink`]. Nothing is
//! buffered and nothing is allocated; the whole call is bracketed by the
//! sink's `enter`/`leave` hooks.
//!
//! ```
//! use printk_core::{printk, sink::BufferSink};
//!
//! let mut storage = [0u8; 32];
//! let mut sink = BufferSink::new(&mut storage);
//! let n = printk!(&mut sink, "irq %d at %#x", 14, 0x3f8u32).unwrap();
//! assert_eq!(sink.as_bytes(), b"irq 14 at 0x3f8");
//! assert_eq!(n, 15);
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod args;
pub mod config;
#[cfg(feature = "std")]
pub mod console;
pub mod error;
pub mod flags;
pub mod format;
pub mod number;
pub mod sink;

pub use args::{Arg, ArgKind, ArgSource, Args, HealingArgs};
pub use config::ArgMode;
pub use error::{ArgError, FormatError};
pub use flags::{Base, FormatFlags, FormatSpec, LengthMod};
pub use format::{printk, printk_with_mode, vprintk};
pub use number::render_number;
pub use sink::Sink;

/// Formats into a sink with arguments given as expressions.
///
/// Each argument is converted with [`Arg::from`]. The template must be a
/// string literal or any expression with an `as_bytes` method.
///
/// Returns the same `Result` as [`printk()`].
#[macro_export]
macro_rules! printk {
    ($sink:expr, $fmt:expr $(,)?) => {
        $crate::format::printk($sink, Some($fmt.as_bytes()), &[])
    };
    ($sink:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $crate::format::printk(
            $sink,
            Some($fmt.as_bytes()),
            &[$($crate::args::Arg::from($arg)),+],
        )
    };
}
