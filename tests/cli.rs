use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn temp_workspace() -> TempDir {
    tempfile::tempdir().expect("create tempdir")
}

fn hmmtag() -> Command {
    Command::cargo_bin("hmmtag").expect("binary exists")
}

#[test]
fn train_then_tag() {
    let workspace = temp_workspace();
    let model = workspace.path().join("hmm.json");
    let corpus = fs::canonicalize("tests/data/tiny.txt").unwrap();

    hmmtag()
        .args(["train", "--corpus"])
        .arg(&corpus)
        .arg("--output")
        .arg(&model)
        .assert()
        .success();
    let doc: Value = serde_json::from_slice(&fs::read(&model).unwrap()).unwrap();
    let fields: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(fields, ["start_prob", "emission", "transition"]);

    let output = hmmtag()
        .arg("tag")
        .arg("--model")
        .arg(&model)
        .args(["The", "cat", "runs", "."])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "The\tDT\ncat\tNN\nruns\tVBZ\n.\t.\n"
    );
}

#[test]
fn missing_model_fails() {
    let workspace = temp_workspace();
    hmmtag()
        .current_dir(workspace.path())
        .args(["tag", "--model", "nope.json", "dog"])
        .assert()
        .failure();
}

#[test]
fn invalid_smoothing_fails() {
    let workspace = temp_workspace();
    let model = workspace.path().join("hmm.json");
    fs::write(
        &model,
        r#"{"start_prob": {"NN": 1.0}, "emission": {"NN": {"dog": 1.0}}, "transition": {}}"#,
    )
    .unwrap();
    hmmtag()
        .arg("tag")
        .arg("--model")
        .arg(&model)
        .args(["--unseen-weight", "0", "dog"])
        .assert()
        .failure();
}

#[test]
fn merge_dictionaries() {
    let workspace = temp_workspace();
    let dir = workspace.path();
    fs::write(dir.join("primary.json"), r#"{"a": 1, "b": 2}"#).unwrap();
    fs::write(dir.join("secondary.json"), r#"{"b": 20, "c": 3}"#).unwrap();

    let output = hmmtag()
        .current_dir(dir)
        .args([
            "merge",
            "--primary",
            "primary.json",
            "--secondary",
            "secondary.json",
            "--output",
            "merged.json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Conflicts (resolved in favor of primary): 1"), "{stdout}");

    let merged: Value = serde_json::from_slice(&fs::read(dir.join("merged.json")).unwrap()).unwrap();
    assert_eq!(merged, serde_json::json!({"a": 1, "b": 2, "c": 3}));
}

#[test]
fn corpus_stats() {
    let output = hmmtag()
        .args(["stats", "--input", "tests/data/tiny.txt"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Total lines: 26"), "{stdout}");
    assert!(stdout.contains("Unique tags: 7"), "{stdout}");
    assert!(stdout.contains("Tags: ., :, DT, JJ, NN, RB, VBZ"), "{stdout}");
}

#[test]
fn verbose_train_then_eval() {
    let workspace = temp_workspace();
    let model = workspace.path().join("hmm.json");
    let corpus = fs::canonicalize("tests/data/tiny.txt").unwrap();

    let stderr = hmmtag()
        .env_remove("RUST_LOG")
        .arg("-v")
        .arg("train")
        .arg("--corpus")
        .arg(&corpus)
        .arg("--output")
        .arg(&model)
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(stderr).unwrap();
    assert!(stderr.contains("wrote model to"), "{stderr}");

    let output = hmmtag()
        .arg("eval")
        .arg("--model")
        .arg(&model)
        .arg("--coarse")
        .arg(&corpus)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Performance by label"), "{stdout}");
    assert!(stdout.contains("\tNOUN: "), "{stdout}");
    assert!(stdout.contains("Item accuracy: "), "{stdout}");
    assert!(stdout.contains("Elapsed time: "), "{stdout}");
}

#[test]
fn normalize_dictionary() {
    let workspace = temp_workspace();
    let dir = workspace.path();
    fs::write(
        dir.join("dict.json"),
        r#"{"read": {"DEFAULT": "rid", "VBD": "red"}, "dog": "dog"}"#,
    )
    .unwrap();

    let output = hmmtag()
        .current_dir(dir)
        .args(["normalize", "--input", "dict.json", "--output", "clean.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Replaced entries with DEFAULT: 1"), "{stdout}");

    let cleaned: Value = serde_json::from_slice(&fs::read(dir.join("clean.json")).unwrap()).unwrap();
    assert_eq!(cleaned, serde_json::json!({"read": "rid", "dog": "dog"}));
}

#[test]
fn nonstandard_tokens() {
    let workspace = temp_workspace();
    let dir = workspace.path();
    fs::write(dir.join("corpus.txt"), "it PRP\n's VBZ\ne.g. FW\ndog NN\n's VBZ\n").unwrap();

    let output = hmmtag()
        .current_dir(dir)
        .args(["nonstandard", "--input", "corpus.txt", "--output", "rules.txt"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Saved 2 non-standard tokens"), "{stdout}");
    assert_eq!(fs::read_to_string(dir.join("rules.txt")).unwrap(), "'s\ne.g.\n");
}
