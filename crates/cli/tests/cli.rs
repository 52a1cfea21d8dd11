use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

const HELLO: &str = r#"{"tagname": "document", "children": [
    {"tagname": "title", "children": ["Hello"]},
    {"tagname": "paragraph", "children": ["World"]}
]}"#;

const DANGLING: &str = r#"{"tagname": "paragraph", "children": [
    {"tagname": "reference", "attributes": {"refname": "nowhere"}, "children": ["nowhere"]}
]}"#;

const ANCHORED: &str = r#"{"tagname": "document", "children": [
    {"tagname": "target", "attributes": {"refid": "intro"}},
    {"tagname": "paragraph", "children": ["Intro"]}
]}"#;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("writer")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn converts_stdin_to_stdout() {
    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.write_stdin(HELLO)
        .assert()
        .success()
        .stdout("# Hello\n\nWorld\n\n\n");
}

#[test]
fn converts_fixture_file() {
    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg(fixture_path("guide.json"));

    let output_pred = predicate::str::contains("# User Guide")
        .and(predicate::str::contains("```bash"))
        .and(predicate::str::contains(
            "[install-guide]: https://example.com/install",
        ));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn output_file_receives_exact_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.json");
    let output = dir.path().join("hello.md");
    std::fs::write(&input, HELLO).unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg(&input).arg("-o").arg(&output);
    cmd.assert().success().stdout("");

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "# Hello\n\nWorld\n\n"
    );
}

#[test]
fn invalid_json_reports_location_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "{\"tagname\": ").unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg(&input);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parse error at").and(predicate::str::contains("broken.json")));
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg("does-not-exist.json");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn unresolved_reference_is_dropped_by_default() {
    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.write_stdin(DANGLING)
        .assert()
        .success()
        .stdout(predicate::str::contains("[nowhere][nowhere]").and(predicate::str::contains("]:").not()));
}

#[test]
fn strict_flag_rejects_unresolved_reference() {
    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg("--strict")
        .write_stdin(DANGLING)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unresolved reference: nowhere"));
}

#[test]
fn config_file_and_flags_control_anchors() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("rst2gfm.yaml");
    std::fs::write(&config, "anchor_targets: false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.write_stdin(ANCHORED)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<a id="intro"></a>"#));

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg("--config")
        .arg(&config)
        .write_stdin(ANCHORED)
        .assert()
        .success()
        .stdout(predicate::str::contains("<a id").not());

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg("--no-anchors")
        .write_stdin(ANCHORED)
        .assert()
        .success()
        .stdout(predicate::str::contains("<a id").not());
}

#[test]
fn unknown_config_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("rst2gfm.yaml");
    std::fs::write(&config, "anchors: false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg("--config")
        .arg(&config)
        .write_stdin(HELLO)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn batch_writes_one_file_per_input() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    std::fs::write(&first, HELLO).unwrap();
    std::fs::write(&second, ANCHORED).unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg(&first)
        .arg(&second)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--jobs")
        .arg("2");
    cmd.assert().success();

    assert_eq!(
        std::fs::read_to_string(out_dir.join("first.md")).unwrap(),
        "# Hello\n\nWorld\n\n"
    );
    assert!(
        std::fs::read_to_string(out_dir.join("second.md"))
            .unwrap()
            .contains("Intro")
    );
}

#[test]
fn batch_failure_sets_exit_code_but_keeps_good_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    std::fs::write(&good, HELLO).unwrap();
    std::fs::write(&bad, "[1, 2").unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg(&good).arg(&bad).arg("--out-dir").arg(&out_dir);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("bad.json"));

    assert!(out_dir.join("good.md").exists());
    assert!(!out_dir.join("bad.md").exists());
}

#[test]
fn multiple_inputs_require_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");
    std::fs::write(&first, HELLO).unwrap();
    std::fs::write(&second, HELLO).unwrap();

    let mut cmd = cargo_bin_cmd!("rst2gfm");
    cmd.arg(&first).arg(&second);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--out-dir"));
}
