//! Actor 二进制端到端测试：经由 CLAW_INPUT 环境变量调用，检查 stdout 与退出码

use std::ffi::OsStr;
use std::process::{Command, Output};

fn run_bin(bin: &str, input: Option<&OsStr>) -> Output {
    let mut cmd = Command::new(bin);
    cmd.env_remove("RUST_LOG");
    match input {
        Some(raw) => cmd.env("CLAW_INPUT", raw),
        None => cmd.env_remove("CLAW_INPUT"),
    };
    cmd.output().expect("Failed to spawn actor binary")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

const TEMPLATE_EMPTY: [&str; 3] = [
    "[CLAW:INFO] Template actor booted",
    "[CLAW:DEBUG] Input payload: {}",
    "[CLAW:INFO] Template actor finished",
];

#[test]
fn test_template_with_unset_input() {
    let output = run_bin(env!("CARGO_BIN_EXE_claw-template"), None);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), TEMPLATE_EMPTY);
}

#[test]
fn test_template_with_empty_object_and_empty_string() {
    for raw in ["{}", ""] {
        let output = run_bin(env!("CARGO_BIN_EXE_claw-template"), Some(OsStr::new(raw)));
        assert!(output.status.success(), "{raw:?}");
        assert_eq!(stdout_lines(&output), TEMPLATE_EMPTY, "{raw:?}");
    }
}

#[test]
fn test_instagram_dry_run_via_env() {
    let output = run_bin(
        env!("CARGO_BIN_EXE_claw-instagram-uploader"),
        Some(OsStr::new(r#"{"assetPath":"/tmp/a.mp4","dryRun":true}"#)),
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        vec![
            "[CLAW:INFO] Instagram uploader started",
            "[CLAW:DEBUG] Asset: /tmp/a.mp4",
            "[CLAW:WARN] Dry-run enabled, upload skipped",
            "[CLAW:INFO] Instagram uploader done",
        ]
    );
}

#[test]
fn test_malformed_input_exits_non_zero() {
    let output = run_bin(
        env!("CARGO_BIN_EXE_claw-tiktok-poster"),
        Some(OsStr::new("not json")),
    );
    assert_eq!(output.status.code(), Some(1));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[CLAW:ERROR] Malformed payload:"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_input_exits_non_zero() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![b'{', 0xff, b'}']);
    let output = run_bin(env!("CARGO_BIN_EXE_claw-instagram-uploader"), Some(&raw));
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec!["[CLAW:ERROR] Malformed payload: CLAW_INPUT is not valid UTF-8"]
    );
}
