//! CLI tests for input selection, usage errors, and exit status.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use assert_cmd::cargo;

const SAMPLE_RTF: &str = r"{\rtf1\ansicpg1252\pard Caf\'e9}";
const SAMPLE_FORMATTED: &str = "{\\rtf1 \\ansicpg1252 \\pard\nCaf\u{e9}\n}\n";
const USAGE: &str = "usage: rtf2rtf [FILE | -]\n";

fn rtf2rtf_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("rtf2rtf"));
    cmd.env_remove("RTF2RTF_PAGE_SIZE")
        .env_remove("RTF2RTF_DIAGNOSTICS");
    cmd
}

fn write_temp_rtf(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.rtf");
    fs::write(&path, content).expect("write temp rtf");
    (dir, path.to_string_lossy().to_string())
}

fn run_with_stdin(mut cmd: Command, stdin_body: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rtf2rtf");

    {
        let stdin = child.stdin.as_mut().expect("stdin handle");
        stdin
            .write_all(stdin_body.as_bytes())
            .expect("write stdin body");
    }

    child.wait_with_output().expect("wait for output")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── Input selection ─────────────────────────────────────────────────────

#[test]
fn reads_stdin_without_arguments() {
    let output = run_with_stdin(rtf2rtf_cmd(), SAMPLE_RTF);
    assert!(output.status.success(), "stderr={}", stderr_of(&output));
    assert_eq!(stdout_of(&output), SAMPLE_FORMATTED);
    assert!(output.stderr.is_empty(), "stderr={}", stderr_of(&output));
}

#[test]
fn reads_stdin_for_dash() {
    let mut cmd = rtf2rtf_cmd();
    cmd.arg("-");
    let output = run_with_stdin(cmd, SAMPLE_RTF);
    assert!(output.status.success(), "stderr={}", stderr_of(&output));
    assert_eq!(stdout_of(&output), SAMPLE_FORMATTED);
}

#[test]
fn reads_named_file() {
    let (_dir, path) = write_temp_rtf(SAMPLE_RTF);
    let output = rtf2rtf_cmd().arg(&path).output().expect("run rtf2rtf");
    assert!(output.status.success(), "stderr={}", stderr_of(&output));
    assert_eq!(stdout_of(&output), SAMPLE_FORMATTED);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.rtf");
    let path = path.to_string_lossy().to_string();

    let output = rtf2rtf_cmd().arg(&path).output().expect("run rtf2rtf");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains(&path) && stderr.contains("cannot open for reading"),
        "stderr={stderr}"
    );
}

// ── Usage errors ────────────────────────────────────────────────────────

#[test]
fn options_are_usage_errors() {
    for flag in ["-x", "--", "--help", "-h", "--version", "-V"] {
        let output = rtf2rtf_cmd().arg(flag).output().expect("run rtf2rtf");
        assert_eq!(output.status.code(), Some(1), "flag {flag}");
        assert!(output.stdout.is_empty(), "flag {flag}");
        assert_eq!(stderr_of(&output), USAGE, "flag {flag}");
    }
}

#[test]
fn double_dash_does_not_end_options() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("-x.rtf");
    fs::write(&path, br"{\pard x}").expect("write input");
    let output = rtf2rtf_cmd()
        .current_dir(dir.path())
        .args(["--", "-x.rtf"])
        .output()
        .expect("run rtf2rtf");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(stderr_of(&output), USAGE);
}

#[test]
fn extra_arguments_are_usage_errors() {
    let output = rtf2rtf_cmd()
        .args(["a.rtf", "b.rtf"])
        .output()
        .expect("run rtf2rtf");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_of(&output), USAGE);
}

// ── Diagnostics and exit status ─────────────────────────────────────────

#[test]
fn diagnostics_do_not_change_exit_status() {
    let output = run_with_stdin(rtf2rtf_cmd(), r"{\pard a\'zg b}");
    assert!(output.status.success(), "stderr={}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "{\\pard\na\n\\'zg b\n}\n");
    assert_eq!(
        stderr_of(&output),
        "rtf2rtf: warn[RTF1001]: invalid hex escape: \\'zg (bytes 8..12)\nrtf2rtf: 1 warning\n"
    );
}

#[test]
fn page_size_override() {
    let mut cmd = rtf2rtf_cmd();
    cmd.env("RTF2RTF_PAGE_SIZE", "4");
    let output = run_with_stdin(cmd, r"\abcdefg");
    assert!(output.status.success(), "stderr={}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "\\abc defg\n");
}

#[test]
fn invalid_page_size_is_fatal() {
    for value in ["2", "lots"] {
        let output = rtf2rtf_cmd()
            .env("RTF2RTF_PAGE_SIZE", value)
            .stdin(Stdio::null())
            .output()
            .expect("run rtf2rtf");
        assert_eq!(output.status.code(), Some(1), "value {value}");
        assert!(output.stdout.is_empty(), "value {value}");
        assert!(
            stderr_of(&output).contains("RTF2RTF_PAGE_SIZE"),
            "stderr={}",
            stderr_of(&output)
        );
    }
}
