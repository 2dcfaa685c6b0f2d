//! Character sinks.
//!
//! A sink is the only output path of the engine. `put` receives every emitted
//! byte in order; `enter` and `leave` are invoked exactly once per top-level
//! formatting call and bracket all `put` calls of that call. Platforms use the
//! hooks to take a console lock or mask interrupts for the whole line.

/// Single-byte output primitive with bracketing hooks.
pub trait Sink {
    /// Called once before the first byte of a formatting call.
    #[inline]
    fn enter(&mut self) {}

    /// Emits one byte.
    fn put(&mut self, byte: u8);

    /// Called once after the last byte of a formatting call.
    #[inline]
    fn leave(&mut self) {}
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn enter(&mut self) {
        (**self).enter();
    }

    #[inline]
    fn put(&mut self, byte: u8) {
        (**self).put(byte);
    }

    #[inline]
    fn leave(&mut self) {
        (**self).leave();
    }
}

#[cfg(feature = "std")]
impl Sink for std::vec::Vec<u8> {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Sink built from three plain function pointers.
///
/// This is the shape a board support package usually exports: a polled UART
/// write plus a pair of functions that disable and restore interrupts.
#[derive(Debug, Clone, Copy)]
pub struct HookSink {
    pub enter: fn(),
    pub put: fn(u8),
    pub leave: fn(),
}

impl HookSink {
    /// A hook bundle whose `enter`/`leave` do nothing.
    #[must_use]
    pub const fn unbracketed(put: fn(u8)) -> Self {
        fn nop() {}
        Self {
            enter: nop,
            put,
            leave: nop,
        }
    }
}

impl Sink for HookSink {
    #[inline]
    fn enter(&mut self) {
        (self.enter)();
    }

    #[inline]
    fn put(&mut self, byte: u8) {
        (self.put)(byte);
    }

    #[inline]
    fn leave(&mut self) {
        (self.leave)();
    }
}

/// Sink that forwards every byte to a closure.
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> Sink for FnSink<F> {
    #[inline]
    fn put(&mut self, byte: u8) {
        (self.0)(byte);
    }
}

/// Fixed-capacity sink over a caller-owned byte slice.
///
/// Bytes past the end of the slice are dropped and counted, so a caller can
/// detect truncation the way `snprintf` reports it.
#[derive(Debug)]
pub struct BufferSink<'a> {
    buf: &'a mut [u8],
    len: usize,
    dropped: usize,
}

impl<'a> BufferSink<'a> {
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            dropped: 0,
        }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of bytes that did not fit.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns true if any byte was dropped.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.dropped > 0
    }

    /// Rewinds to an empty buffer.
    pub fn clear(&mut self) {
        self.len = 0;
        self.dropped = 0;
    }
}

impl Sink for BufferSink<'_> {
    #[inline]
    fn put(&mut self, byte: u8) {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
            }
            None => self.dropped += 1,
        }
    }
}

/// Sink that discards output and keeps counters, for sizing a message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSink {
    pub bytes: usize,
    pub enters: usize,
    pub leaves: usize,
}

impl Sink for CountingSink {
    fn enter(&mut self) {
        self.enters += 1;
    }

    fn put(&mut self, _byte: u8) {
        self.bytes += 1;
    }

    fn leave(&mut self) {
        self.leaves += 1;
    }
}
