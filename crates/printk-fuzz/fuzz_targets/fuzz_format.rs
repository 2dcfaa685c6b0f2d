#![no_main]
use libfuzzer_sys::fuzz_target;
use printk_core::sink::CountingSink;
use printk_core::{Arg, ArgMode, printk_with_mode};

fuzz_target!(|data: &[u8]| {
    // First byte picks how many leading bytes become arguments.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split % 16).min(rest.len());
    let (raw_args, template) = rest.split_at(split);
    // Bound field widths so a single input cannot emit gigabytes.
    if template
        .split(|b| !b.is_ascii_digit())
        .any(|run| run.len() > 4)
    {
        return;
    }

    let args: Vec<Arg<'_>> = raw_args
        .iter()
        .map(|&b| match b % 5 {
            0 => Arg::Int(i32::from(b as i8)),
            1 => Arg::Uint(u32::from(b) * 3),
            2 => Arg::Char(b),
            3 => Arg::Str(if b & 0x80 == 0 { Some(template) } else { None }),
            _ => Arg::Ptr(usize::from(b) << 8),
        })
        .collect();

    // Hardened mode never fails, and the count is exactly what reached the sink.
    let mut sink = CountingSink::default();
    let n = printk_with_mode(&mut sink, Some(template), &args, ArgMode::Hardened)
        .expect("hardened formatting cannot fail");
    assert_eq!(n, sink.bytes);
    assert_eq!((sink.enters, sink.leaves), (1, 1));

    // Strict mode may stop early but still accounts for every byte.
    let mut sink = CountingSink::default();
    let n = match printk_with_mode(&mut sink, Some(template), &args, ArgMode::Strict) {
        Ok(n) => n,
        Err(e) => e.emitted,
    };
    assert_eq!(n, sink.bytes);
});
