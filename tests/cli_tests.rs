use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cmd() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("assetlint").unwrap()
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let output = cmd().args(args).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

const WIDGET_CONFIG: &str = r#"
[classes]
uasset = "Widget Blueprint"

[[naming_conventions]]
class = "Widget Blueprint"
prefix = "WBP_"

[rule_sets.default]
rules = [{ id = "naming-convention" }]

[rule_sets.lenient]
extends = "default"
rules = [{ id = "naming-convention", severity = "warning" }]

[rule_sets.off]
extends = "default"
rules = [{ id = "naming-convention", enabled = false }]
"#;

/// Project with `Content/UI/Widgets/{files}` and the given config.
fn project(config: &str, files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let widgets = dir.path().join("Content/UI/Widgets");
    fs::create_dir_all(&widgets).unwrap();
    for file in files {
        fs::write(widgets.join(file), "").unwrap();
    }
    fs::write(dir.path().join(".assetlintrc.toml"), config).unwrap();
    dir
}

fn root(dir: &tempfile::TempDir) -> String {
    dir.path().display().to_string()
}

#[test]
fn clean_project_exits_0() {
    let dir = project(WIDGET_CONFIG, &["WBP_Login.uasset", "WBP_Pause.uasset"]);
    cmd()
        .args(["check", "--project", &root(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn naming_violation_scenario() {
    let dir = project(WIDGET_CONFIG, &["WBP_Login.uasset", "LoginScreen.uasset"]);
    cmd()
        .args(["check", "/Game/UI/Widgets", "--project", &root(&dir)])
        .assert()
        .failure()
        .code(1);

    let parsed = json_output(&[
        "check",
        "/Game/UI/Widgets",
        "--project",
        &root(&dir),
        "--format",
        "json",
    ]);
    let violations = parsed["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["asset"], "/Game/UI/Widgets/LoginScreen");
    assert_eq!(violations[0]["rule"], "naming-convention");
    assert_eq!(violations[0]["severity"], "error");
    assert!(violations[0]["message"]
        .as_str()
        .unwrap()
        .contains("\"WBP_\""));
    assert_eq!(parsed["summary"]["failing_assets"], 1);
    assert_eq!(parsed["summary"]["informational_assets"], 0);
    assert_eq!(parsed["summary"]["assets_total"], 2);
    assert_eq!(parsed["summary"]["cancelled"], false);
}

#[test]
fn severity_override_makes_violation_informational() {
    let dir = project(WIDGET_CONFIG, &["LoginScreen.uasset"]);
    let parsed = json_output(&[
        "check",
        "--project",
        &root(&dir),
        "--rule-set",
        "lenient",
        "--format",
        "json",
    ]);
    assert_eq!(parsed["violations"][0]["severity"], "warning");
    assert_eq!(parsed["summary"]["failing_assets"], 0);
    assert_eq!(parsed["summary"]["informational_assets"], 1);

    cmd()
        .args(["check", "--project", &root(&dir), "--rule-set", "lenient"])
        .assert()
        .success();
    cmd()
        .args([
            "check",
            "--project",
            &root(&dir),
            "--rule-set",
            "lenient",
            "--fail-on",
            "warning",
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn disabled_rule_set_reports_nothing() {
    let dir = project(WIDGET_CONFIG, &["LoginScreen.uasset"]);
    let parsed = json_output(&[
        "check",
        "--project",
        &root(&dir),
        "--rule-set",
        "off",
        "--format",
        "json",
    ]);
    assert!(parsed["violations"].as_array().unwrap().is_empty());
}

#[test]
fn sequential_and_parallel_output_match() {
    let files: Vec<String> = (0..40)
        .map(|i| {
            if i % 3 == 0 {
                format!("Screen{i}.uasset")
            } else {
                format!("WBP_Screen{i}.uasset")
            }
        })
        .collect();
    let files: Vec<&str> = files.iter().map(String::as_str).collect();
    let dir = project(WIDGET_CONFIG, &files);

    let run = |jobs: &str| {
        cmd()
            .args(["check", "--project", &root(&dir), "--format", "json", "--jobs", jobs])
            .output()
            .unwrap()
            .stdout
    };
    let sequential = run("1");
    assert_eq!(run("4"), sequential);
    assert_eq!(run("0"), sequential);
}

#[test]
fn unknown_path_is_fatal() {
    let dir = project(WIDGET_CONFIG, &["WBP_Login.uasset"]);
    cmd()
        .args(["check", "/Game/Missing", "--project", &root(&dir)])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("/Game/Missing"));
}

#[test]
fn duplicate_classification_is_config_error() {
    let config = r#"
[[naming_conventions]]
class = "Static Mesh"
prefix = "SM_"

[[naming_conventions]]
class = "Static Mesh"
prefix = "S_"
"#;
    let dir = project(config, &[]);
    cmd()
        .args(["check", "--project", &root(&dir)])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("duplicate naming convention"));
}

#[test]
fn unknown_rule_suggests_fix() {
    let dir = project(
        "[rule_sets.default]\nrules = [{ id = \"naming-convetion\" }]\n",
        &[],
    );
    cmd()
        .args(["check", "--project", &root(&dir)])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("did you mean \"naming-convention\""));
}

#[test]
fn catalog_accessor() {
    let dir = project(WIDGET_CONFIG, &[]);
    let catalog = dir.path().join("registry.json");
    fs::write(
        &catalog,
        r#"{"assets": [
            {"path": "/Game/UI/WBP_Login", "class": "Widget Blueprint"},
            {"path": "/Game/UI/LoginScreen", "class": "Widget Blueprint", "loaded": false},
            {"path": "/Game/Broken", "class": "Widget Blueprint", "loaded": false,
             "load_error": "corrupt package"},
            {"path": "/Game/Audio/S_Boom", "class": "Sound Wave", "loaded": false,
             "load_error": "corrupt"}
        ]}"#,
    )
    .unwrap();

    let parsed = json_output(&[
        "check",
        "--project",
        &root(&dir),
        "--catalog",
        &catalog.display().to_string(),
        "--format",
        "json",
    ]);
    let violations = parsed["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0]["asset"], "/Game/UI/LoginScreen");
    assert_eq!(violations[1]["asset"], "/Game/Broken");
    assert!(violations[1]["message"]
        .as_str()
        .unwrap()
        .starts_with("rule fault:"));
    assert_eq!(violations[1]["severity"], "error");
}

#[test]
fn builtin_default_rule_set_without_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Content")).unwrap();
    fs::write(dir.path().join("Content/Loose Asset.uasset"), "").unwrap();

    let parsed = json_output(&["check", "--project", &root(&dir), "--format", "json"]);
    let rules: Vec<_> = parsed["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["rule"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(rules, vec!["allowed-characters", "top-level"]);
}

#[test]
fn github_output_format() {
    let dir = project(WIDGET_CONFIG, &["LoginScreen.uasset"]);
    let output = cmd()
        .args(["check", "--project", &root(&dir), "--format", "github"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for line in stdout.lines() {
        assert!(
            line.starts_with("::error title=naming-convention::/Game/UI/Widgets/LoginScreen: "),
            "unexpected annotation: {line}"
        );
    }
}

#[test]
fn rule_sets_listing() {
    let dir = project(WIDGET_CONFIG, &[]);
    cmd()
        .args(["rule-sets", "--project", &root(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("default (default)"))
        .stdout(predicate::str::contains("lenient"))
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn init_creates_config() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["init"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .assetlintrc.toml"));

    assert!(dir.path().join(".assetlintrc.toml").exists());
}

#[test]
fn init_fails_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".assetlintrc.toml"), "").unwrap();
    cmd()
        .args(["init"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn init_config_lints_clean_project() {
    let dir = tempfile::tempdir().unwrap();
    cmd().args(["init"]).current_dir(dir.path()).assert().success();
    fs::create_dir_all(dir.path().join("Content/Props")).unwrap();
    fs::write(dir.path().join("Content/Props/SM_Rock.uasset"), "").unwrap();

    cmd()
        .args(["check", "--project", &root(&dir), "--fail-on", "info"])
        .assert()
        .success();
}

#[test]
fn explain_lists_rules() {
    cmd()
        .args(["explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("naming-convention"));
}

#[test]
fn explain_unknown_rule_fails() {
    cmd()
        .args(["explain", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown rule: nope"));
}

#[test]
fn explicit_config_path() {
    let dir = project("", &["LoginScreen.uasset"]);
    let config = dir.path().join("strict.toml");
    fs::write(&config, WIDGET_CONFIG).unwrap();
    cmd()
        .args([
            "check",
            "--project",
            &root(&dir),
            "--config",
            &config.display().to_string(),
        ])
        .assert()
        .failure()
        .code(1);
}
