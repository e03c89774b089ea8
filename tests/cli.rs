use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_webidl2ts"));
    cmd.env_remove("WEBIDL2TS_LOG");
    cmd
}

fn ty(name: &str) -> Value {
    json!({ "type": null, "extAttrs": [], "generic": "", "nullable": false, "union": false, "idlType": name })
}

fn definitions() -> Value {
    json!([
        {
            "type": "interface", "name": "Counter", "inheritance": null, "partial": false,
            "extAttrs": [],
            "members": [
                { "type": "constructor", "arguments": [] },
                { "type": "attribute", "name": "value", "idlType": ty("long"), "readonly": true, "special": "" },
                { "type": "operation", "name": "increment", "idlType": ty("void"), "arguments": [], "special": "" },
                { "type": "mystery" }
            ]
        },
        { "type": "eof", "value": "" }
    ])
}

fn write_json(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_ambient_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "counter.json", &definitions());

    let output = bin().current_dir(dir.path()).arg(&input).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("// Auto-generated from WebIDL\n\ninterface Counter {\n"));
    assert!(text.contains("    new (): Counter;\n"));
    assert!(text.contains("    readonly value: number;\n"));
    assert!(text.contains("    increment(): void;\n"));

    // The unknown member is reported but does not fail the run.
    assert!(stderr(&output).contains("warning: Unsupported IDL member in `Counter`"));
}

#[test]
fn test_emscripten_to_file_with_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "counter.json", &definitions());
    let out = dir.path().join("counter.d.ts");

    let status = bin()
        .current_dir(dir.path())
        .args(["--emscripten", "--module", "Lib", "--no-header", "--report", "-o"])
        .arg(&out)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("declare namespace Lib {\n    class Counter {\n"));
    assert!(text.contains("        constructor();\n"));
    assert!(text.contains("        get_value(): number;\n"));
    assert!(text.contains("        set_value(value: number): void;\n"));
    assert!(text.ends_with("declare function Lib(): Promise<typeof Lib>;\n"));

    let report = fs::read_to_string(dir.path().join("counter.d.ts.report.md")).unwrap();
    assert!(report.contains("| class | 1 |"));
    assert!(report.contains("Unsupported IDL member in `Counter`"));
}

#[test]
fn test_config_file_and_stdin() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("webidl2ts.toml"),
        "[output]\nindent_size = 2\nheader = false\n",
    )
    .unwrap();

    let mut child = bin()
        .current_dir(dir.path())
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(definitions().to_string().as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("interface Counter {\n  new (): Counter;\n"));
}

#[test]
fn test_inputs_are_concatenated() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_json(
        dir.path(),
        "first.json",
        &json!([{ "type": "typedef", "name": "First", "idlType": ty("long") }]),
    );
    let second = write_json(
        dir.path(),
        "second.json",
        &json!([{ "type": "typedef", "name": "Second", "idlType": ty("DOMString") }]),
    );

    let output = bin()
        .current_dir(dir.path())
        .arg("--no-header")
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "type First = number;\n\ntype Second = string;\n"
    );
}

#[test]
fn test_malformed_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "bad.json", &json!({ "type": "interface" }));

    let output = bin().current_dir(dir.path()).arg(&input).output().unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("error: failed to load"));
    assert!(err.contains("bad.json"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "counter.json", &definitions());
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[output]\nindent_size = \"wide\"\n").unwrap();

    let output = bin()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid configuration"));
}
