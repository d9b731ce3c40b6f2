use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "relisim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn stdout_value(stdout: &str, key: &str) -> Option<u64> {
    stdout.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?.trim();
        rest.parse().ok()
    })
}

#[test]
fn fixed_window_lossless_delivers_everything_and_writes_trace() {
    let dir = unique_temp_dir("fixed-window");
    let trace_path = dir.join("trace.json");

    let output = Command::new(env!("CARGO_BIN_EXE_two_hop"))
        .args([
            "--mode",
            "fixed_window",
            "--window",
            "4",
            "--num-packets",
            "10",
            "--trace-json",
        ])
        .arg(&trace_path)
        .output()
        .expect("run two_hop");
    assert!(output.status.success(), "two_hop failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout_value(&stdout, "delivered_pkts "), Some(10));
    assert_eq!(stdout_value(&stdout, "retransmissions "), Some(0));
    assert_eq!(stdout_value(&stdout, "link_drops "), Some(0));

    let trace: Value =
        serde_json::from_str(&fs::read_to_string(&trace_path).expect("read trace json"))
            .expect("parse trace json");
    let events = trace.as_array().expect("trace is an array");
    assert!(!events.is_empty());
    assert!(
        events
            .iter()
            .any(|ev| ev.get("kind").and_then(Value::as_str) == Some("data_send")),
        "expected data_send events in trace"
    );
    assert!(
        events
            .iter()
            .any(|ev| ev.get("kind").and_then(Value::as_str) == Some("delivered")),
        "expected delivered events in trace"
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn scenario_json_drives_the_run() {
    let dir = unique_temp_dir("scenario");
    let scenario_path = dir.join("scenario.json");
    fs::write(
        &scenario_path,
        r#"{ "mode": "stop_and_wait", "num_packets": 5 }"#,
    )
    .expect("write scenario json");

    let output = Command::new(env!("CARGO_BIN_EXE_two_hop"))
        .arg("--scenario-json")
        .arg(&scenario_path)
        .output()
        .expect("run two_hop");
    assert!(output.status.success(), "two_hop failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "mode stop_and_wait"));
    assert_eq!(stdout_value(&stdout, "delivered_pkts "), Some(5));
    assert_eq!(stdout_value(&stdout, "acks_sent "), Some(5));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn full_loss_retransmission_is_bounded_by_until() {
    let output = Command::new(env!("CARGO_BIN_EXE_two_hop"))
        .args([
            "--mode",
            "stop_and_wait_retransmit",
            "--num-packets",
            "1",
            "--loss-l1",
            "1.0",
            "--until-ms",
            "2600",
        ])
        .output()
        .expect("run two_hop");
    assert!(output.status.success(), "two_hop failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout_value(&stdout, "delivered_pkts "), Some(0));
    assert_eq!(stdout_value(&stdout, "retransmissions "), Some(5));
}
