//! Diff rendering for fixture comparison.

use std::fmt::Write;

/// Render a text diff between expected and actual output.
///
/// Output is compared line by line; control bytes are escaped so padding and
/// trailing spaces stay visible.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let exp: Vec<&str> = expected.split('\n').collect();
    let act: Vec<&str> = actual.split('\n').collect();
    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    for i in 0..exp.len().max(act.len()) {
        let (e, a) = (exp.get(i), act.get(i));
        if e == a {
            continue;
        }
        let _ = writeln!(out, "@@ line {} @@", i + 1);
        if let Some(e) = e {
            let _ = writeln!(out, "-{e:?}");
        }
        if let Some(a) = a {
            let _ = writeln!(out, "+{a:?}");
        }
    }
    out
}
