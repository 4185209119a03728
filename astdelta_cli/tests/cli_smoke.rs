use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file_path(prefix: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("astdelta-{prefix}-{nonce}.js"))
}

#[test]
fn ast_diff_cli_prints_text_report() {
    let left = temp_file_path("left-text");
    let right = temp_file_path("right-text");
    fs::write(&left, "let x = 1;\n").expect("write left");
    fs::write(&right, "let x = 2;\n").expect("write right");

    let output = Command::new(env!("CARGO_BIN_EXE_ast-diff"))
        .arg(&left)
        .arg(&right)
        .output()
        .expect("run ast-diff");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Structural Diff Report"));
    assert!(stdout.contains("[MODIFIED] var:x"));

    fs::remove_file(&left).ok();
    fs::remove_file(&right).ok();
}

#[test]
fn ast_diff_cli_emits_parseable_json() {
    let left = temp_file_path("left-json");
    let right = temp_file_path("right-json");
    fs::write(&left, "function foo() { return 1; }\n").expect("write left");
    fs::write(&right, "function foo() { return 2; }\n").expect("write right");

    let output = Command::new(env!("CARGO_BIN_EXE_ast-diff"))
        .arg(&left)
        .arg(&right)
        .arg("--json")
        .output()
        .expect("run ast-diff");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert!(value.get("report").is_some());
    assert_eq!(
        value.get("has_changes").and_then(serde_json::Value::as_bool),
        Some(true)
    );

    fs::remove_file(&left).ok();
    fs::remove_file(&right).ok();
}

#[test]
fn ast_diff_cli_emits_html_summary() {
    let left = temp_file_path("left-html");
    let right = temp_file_path("right-html");
    fs::write(&left, "app.get('/a', cb);\n").expect("write left");
    fs::write(&right, "app.get('/b', cb);\n").expect("write right");

    let output = Command::new(env!("CARGO_BIN_EXE_ast-diff"))
        .arg(&left)
        .arg(&right)
        .arg("--html")
        .output()
        .expect("run ast-diff");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("diff-summary-container"));
    assert!(stdout.contains("status-removed"));
    assert!(stdout.contains("status-added"));

    fs::remove_file(&left).ok();
    fs::remove_file(&right).ok();
}

#[test]
fn ast_diff_cli_fails_on_parse_errors() {
    let left = temp_file_path("left-bad");
    let right = temp_file_path("right-bad");
    fs::write(&left, "let x = ;\n").expect("write left");
    fs::write(&right, "let y = 1;\n").expect("write right");

    let output = Command::new(env!("CARGO_BIN_EXE_ast-diff"))
        .arg(&left)
        .arg(&right)
        .output()
        .expect("run ast-diff");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1"));

    fs::remove_file(&left).ok();
    fs::remove_file(&right).ok();
}
