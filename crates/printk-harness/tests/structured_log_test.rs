//! JSONL logs written by the harness validate against their own schema.

use printk_core::ArgMode;
use printk_harness::structured_log::{
    LogEmitter, LogEntry, LogLevel, Outcome, validate_log_file, validate_log_line,
};
use printk_harness::{FixtureSet, TestRunner};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("printk-{}-{name}", std::process::id()))
}

#[test]
fn run_log_round_trips_through_validator() {
    let set = FixtureSet::from_json(
        r#"{"version":"v1","family":"printk/log","captured_at":"2026-10-18T00:00:00Z","cases":[
            {"name":"ok","section":"width","template":"%3d","args":[{"int":7}],"expected_output":"  7","expected_count":3},
            {"name":"bad","section":"width","template":"%3d","args":[{"int":7}],"expected_output":"7","expected_count":1},
            {"name":"heal","section":"args","template":"%d","expected_output":"0","expected_count":1,"mode":"hardened","expect_error":"exhausted"}
        ]}"#,
    )
    .unwrap();

    let path = temp_path("run.jsonl");
    let mut emitter = LogEmitter::to_file(&path, "printk", "log-test").unwrap();
    emitter.emit(LogLevel::Info, "run_start").unwrap();
    for mode in [ArgMode::Strict, ArgMode::Hardened] {
        for r in TestRunner::new("log", mode).run(&set) {
            emitter.emit_entry(LogEntry::for_result(&r)).unwrap();
        }
    }
    emitter.flush().unwrap();
    drop(emitter);

    let (lines, errors) = validate_log_file(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(errors.is_empty(), "{errors:?}");
    // run_start + 2 strict + 3 hardened
    assert_eq!(lines, 6);

    let entries: Vec<LogEntry> = content
        .lines()
        .enumerate()
        .map(|(i, l)| validate_log_line(l, i + 1).unwrap())
        .collect();
    assert_eq!(entries[0].trace_id, "printk::log-test::001");
    assert_eq!(entries[5].trace_id, "printk::log-test::006");

    let failed: Vec<_> = entries
        .iter()
        .filter(|e| e.outcome == Some(Outcome::Fail))
        .collect();
    assert_eq!(failed.len(), 2);
    assert!(failed.iter().all(|e| e.level == LogLevel::Error));
    assert!(failed[0].details.is_some());

    let healed = entries
        .iter()
        .find(|e| e.case.as_deref() == Some("heal"))
        .unwrap();
    assert_eq!(healed.repairs, Some(1));
    assert_eq!(healed.mode.as_deref(), Some("hardened"));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(validate_log_file(&temp_path("absent.jsonl")).is_err());
}
