//! Benchmark support for printk.
//!
//! The benchmarks live in `benches/`; this crate only provides the sink they
//! format into.

use printk_core::Sink;

/// Counts bytes and discards them.
#[derive(Debug, Default)]
pub struct BlackHole {
    pub bytes: usize,
}

impl Sink for BlackHole {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.bytes += 1;
        std::hint::black_box(byte);
    }
}
