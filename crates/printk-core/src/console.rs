//! Lock-bracketed console output (`std` feature).
//!
//! [`Console`] owns a writer behind a `parking_lot` mutex. The sink it hands
//! out takes the lock in `enter` and keeps it until `leave`, so the bytes of
//! one formatting call are never interleaved with another thread's.

use std::io::Write;

use parking_lot::{Mutex, MutexGuard};

use crate::args::Arg;
use crate::config::ArgMode;
use crate::error::FormatError;
use crate::format::printk_with_mode;
use crate::sink::Sink;

/// A shared output device.
#[derive(Debug, Default)]
pub struct Console<W> {
    inner: Mutex<W>,
}

impl<W: Write> Console<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// A sink bound to this console.
    #[must_use]
    pub fn sink(&self) -> ConsoleSink<'_, W> {
        ConsoleSink {
            console: &self.inner,
            guard: None,
            write_errors: 0,
        }
    }

    /// Formats one message under the console lock.
    pub fn print(
        &self,
        fmt: &[u8],
        args: &[Arg<'_>],
        mode: ArgMode,
    ) -> Result<usize, FormatError> {
        printk_with_mode(&mut self.sink(), Some(fmt), args, mode)
    }

    /// Direct access to the writer, e.g. to inspect a captured buffer.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        self.inner.lock()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

/// Sink that holds the console lock between `enter` and `leave`.
///
/// `put` outside a bracket takes the lock for that single byte.
pub struct ConsoleSink<'c, W> {
    console: &'c Mutex<W>,
    guard: Option<MutexGuard<'c, W>>,
    write_errors: usize,
}

impl<W: Write> ConsoleSink<'_, W> {
    /// Bytes the writer refused. `put` has no error channel, so failures
    /// are only counted.
    #[must_use]
    pub fn write_errors(&self) -> usize {
        self.write_errors
    }

    /// Returns true while the console lock is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.guard.is_some()
    }
}

impl<W: Write> Sink for ConsoleSink<'_, W> {
    fn enter(&mut self) {
        if self.guard.is_none() {
            self.guard = Some(self.console.lock());
        }
    }

    fn put(&mut self, byte: u8) {
        let res = match self.guard.as_mut() {
            Some(w) => w.write_all(&[byte]),
            None => self.console.lock().write_all(&[byte]),
        };
        if res.is_err() {
            self.write_errors += 1;
        }
    }

    fn leave(&mut self) {
        if let Some(mut w) = self.guard.take() {
            if w.flush().is_err() {
                self.write_errors += 1;
            }
        }
    }
}
