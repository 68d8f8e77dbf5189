//! Integration tests for the pathway-viewer binary.
//!
//! These tests run the compiled binary against the JSON-LD fixtures in
//! tests/fixtures and check the rendered page.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pathway-viewer"))
}

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_arg(name: &str) -> String {
    fixture(name).to_string_lossy().into_owned()
}

/// Run the binary with `stdin` piped in. Returns the raw output.
fn run(stdin: &str, args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::Write;
            if let Some(ref mut input) = child.stdin {
                input.write_all(stdin.as_bytes()).ok();
            }
            child.wait_with_output()
        })
        .expect("Failed to run binary")
}

/// Run the binary and require success. Returns stdout.
fn run_ok(stdin: &str, args: &[&str]) -> String {
    let output = run(stdin, args);
    assert!(
        output.status.success(),
        "Binary exited with {:?}:\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Non-UTF8 output")
}

// ─── Rendering ────────────────────────────────────────────────────────────────

#[test]
fn test_renders_fixture_with_model() {
    let page = run_ok("", &[&fixture_arg("pathway.json"), "-m", &fixture_arg("model.json")]);

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Registered Nurse Pathway</title>"));
    assert!(page.contains("Education"));
    assert!(page.contains("Licensure"));
    assert!(page.contains(">2 / 2<"));
    assert!(page.contains(r#"class="pathwayViewer lineCanvas""#));
    assert!(!page.contains(r#"class="pathwayViewer error""#));
}

#[test]
fn test_reads_pathway_from_stdin() {
    let src = fs::read_to_string(fixture("pathway.json")).expect("fixture");
    let page = run_ok(&src, &["--model", &fixture_arg("model.json")]);
    assert!(page.contains("Associate Degree in Nursing"));
}

#[test]
fn test_missing_model_file_is_a_diagnostic() {
    let output = run("", &[&fixture_arg("pathway.json")]);
    assert!(output.status.success());
    let page = String::from_utf8_lossy(&output.stdout);
    assert!(page.contains(
        "Error loading Progression Model from URI https://credentialengineregistry.org/resources/ce-0100-model"
    ));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN"), "diagnostics are logged: {stderr}");
}

#[test]
fn test_unparseable_model_file_is_a_diagnostic() {
    let model = std::env::temp_dir().join(format!("pathway-viewer-model-{}.json", std::process::id()));
    fs::write(&model, "{ not json").expect("write model");
    let model_arg = model.to_string_lossy().into_owned();
    let output = run("", &[&fixture_arg("pathway.json"), "-m", &model_arg]);
    let _ = fs::remove_file(&model);

    assert_eq!(output.status.code(), Some(0));
    let page = String::from_utf8_lossy(&output.stdout);
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("Registered Nurse License"));
    assert!(page.contains(
        "Error loading Progression Model from URI https://credentialengineregistry.org/resources/ce-0100-model"
    ));
}

#[test]
fn test_highlight_flag() {
    let page = run_ok(
        "",
        &[
            &fixture_arg("pathway.json"),
            "-m",
            &fixture_arg("model.json"),
            "--highlight",
            "https://credentialengineregistry.org/resources/ce-0003-degree",
        ],
    );
    assert!(page.contains(r#"data-ishighlighted="true""#));
    assert!(page.contains("drop-shadow"));
}

#[test]
fn test_options_flag() {
    let page = run_ok(
        "",
        &[
            &fixture_arg("pathway.json"),
            "-m",
            &fixture_arg("model.json"),
            "--options",
            r#"{"UI": {"PathwayHeaderTag": "h1"}}"#,
        ],
    );
    assert!(page.contains(r#"<h1 class="pathwayViewer pathwayHeader">"#));
}

#[test]
fn test_output_flag_writes_file() {
    let out = std::env::temp_dir().join(format!("pathway-viewer-{}.html", std::process::id()));
    let out_arg = out.to_string_lossy().into_owned();
    let stdout = run_ok("", &[&fixture_arg("pathway.json"), "-o", &out_arg]);
    assert!(stdout.is_empty());
    let written = fs::read_to_string(&out).expect("output written");
    assert!(written.contains("Registered Nurse Pathway"));
    let _ = fs::remove_file(&out);
}

// ─── Failures ─────────────────────────────────────────────────────────────────

#[test]
fn test_unreadable_input_exits_1() {
    let output = run("", &["/nonexistent/pathway.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}

#[test]
fn test_missing_pathway_exits_1() {
    let output = run(r#"{"@graph": []}"#, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("error: No ceterms:Pathway object found for Pathway"));
}

#[test]
fn test_invalid_json_exits_1() {
    let output = run("not json", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error parsing data for Resource URI: pathway"));
}

#[test]
fn test_invalid_options_exits_2() {
    let output = run("", &[&fixture_arg("pathway.json"), "--options", "[1, 2"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid --options"));
}

#[test]
fn test_version_flag() {
    let stdout = run_ok("", &["--version"]);
    assert!(stdout.starts_with("pathway-viewer "));
}
