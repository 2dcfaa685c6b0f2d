//! Formatting throughput benchmarks.
//!
//! Measures the numeric renderer alone, a typical log line through the full
//! interpreter, and a padding-heavy template where sink calls dominate.

use criterion::{Criterion, criterion_group, criterion_main};
use printk_bench::BlackHole;
use printk_core::{Arg, ArgMode, Base, FormatFlags, printk, printk_with_mode, render_number};

fn bench_render_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_number");
    for (name, base) in [
        ("octal", Base::Octal),
        ("decimal", Base::Decimal),
        ("hex", Base::Hex),
    ] {
        group.bench_function(name, |b| {
            let mut sink = BlackHole::default();
            b.iter(|| {
                criterion::black_box(render_number(
                    &mut sink,
                    criterion::black_box(-1_234_567_890),
                    base,
                    0,
                    0,
                    FormatFlags::default(),
                ));
            });
        });
    }
    group.finish();
}

const LOG_LINE: &[u8] = b"cpu%d: %s: status %#010x err %d\n";
const WIDE_FIELDS: &[u8] = b"%-64d|%64s|%0*d";

fn bench_log_line(c: &mut Criterion) {
    let args = [
        Arg::Int(3),
        Arg::Str(Some(b"eth0")),
        Arg::Uint(0xdead_beef),
        Arg::Int(-42),
    ];
    c.bench_function("log_line_strict", |b| {
        let mut sink = BlackHole::default();
        b.iter(|| {
            printk(
                &mut sink,
                Some(criterion::black_box(LOG_LINE)),
                &args,
            )
        });
    });
    c.bench_function("log_line_hardened", |b| {
        let mut sink = BlackHole::default();
        b.iter(|| {
            printk_with_mode(
                &mut sink,
                Some(criterion::black_box(LOG_LINE)),
                &args,
                ArgMode::Hardened,
            )
        });
    });
}

fn bench_padding(c: &mut Criterion) {
    let args = [Arg::Int(7), Arg::Str(Some(b"x")), Arg::Int(64), Arg::Int(1)];
    c.bench_function("wide_fields", |b| {
        let mut sink = BlackHole::default();
        b.iter(|| {
            printk(&mut sink, Some(criterion::black_box(WIDE_FIELDS)), &args)
        });
    });
}

criterion_group!(benches, bench_render_number, bench_log_line, bench_padding);
criterion_main!(benches);
