//! End-to-end tests driving the infraudit binary

use std::path::Path;
use std::process::{Command, Output};

fn infraudit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_infraudit"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("INFRAUDIT_CATALOG")
        .output()
        .expect("run infraudit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const CONTINUITY_ANSWERS: &str = r#"
bk-strategy = "b"
bk-frequency = "a"
bk-scope = "a"
bk-monitoring = "a"
rc-tests = "a"
rc-objectives = "a"
cp-plan = "a"
cp-power = "a"
"#;

const WORST_CONTINUITY_ANSWERS: &str = r#"
bk-strategy = "c"
bk-frequency = "c"
bk-scope = "c"
bk-monitoring = "c"
rc-tests = "c"
rc-objectives = "c"
cp-plan = "c"
cp-power = "c"
"#;

const CUSTOM_MODULE: &str = r#"
id = "custom"
title = "Custom audit"
standard = "Internal"

[[questions]]
id = "q1"
category = "Ops"
text = "Is it fine?"

[[questions.options]]
id = "yes"
label = "Yes"
score = 10

[[questions.options]]
id = "no"
label = "No"
score = 0

[questions.options.risk]
severity = "major"
description = "It is not fine"
cause = "Nobody checked"
impact = "Things break"
recommendation = { term = "short-term", action = "Check it" }
"#;

#[test]
fn test_modules_lists_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let output = infraudit(dir.path(), &["modules", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let modules: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = modules
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["infrastructure", "security", "continuity", "governance"]);
    assert_eq!(modules[2]["questions"], 8);
}

#[test]
fn test_validate_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let output = infraudit(dir.path(), &["validate"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Catalog is valid: 4 modules"));
}

#[test]
fn test_show_module() {
    let dir = tempfile::tempdir().unwrap();
    let output = infraudit(dir.path(), &["show", "continuity"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("bk-strategy"));

    let output = infraudit(dir.path(), &["show", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope"));
}

#[test]
fn test_score_json_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("answers.toml"), CONTINUITY_ANSWERS).unwrap();

    let output = infraudit(
        dir.path(),
        &[
            "score",
            "continuity",
            "--answers",
            "answers.toml",
            "-f",
            "json",
            "--reference",
            "AUD-TEST-1",
            "--date",
            "2026-05-04",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["reference"], "AUD-TEST-1");
    assert_eq!(parsed["date"], "2026-05-04");
    let report = &parsed["report"];
    assert_eq!(report["module_id"], "continuity");
    assert_eq!(report["total_score"], 75);
    assert_eq!(report["total_max"], 80);
    assert_eq!(report["global_score"], 94);
    assert_eq!(report["maturity"], "optimized");
    assert_eq!(report["risks"].as_array().unwrap().len(), 1);
    assert_eq!(report["risks"][0]["question_id"], "bk-strategy");
    assert_eq!(report["risks"][0]["severity"], "major");
}

#[test]
fn test_score_ranks_worst_answers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("answers.toml"), WORST_CONTINUITY_ANSWERS).unwrap();

    let output = infraudit(dir.path(), &["score", "continuity", "--answers", "answers.toml", "-f", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let report = &parsed["report"];
    assert_eq!(report["global_score"], 6);
    assert_eq!(report["maturity"], "initial");

    let weight = |s: &str| match s {
        "critical" => 4,
        "major" => 3,
        "moderate" => 2,
        _ => 1,
    };
    let weights: Vec<i32> = report["risks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| weight(r["severity"].as_str().unwrap()))
        .collect();
    assert_eq!(weights.len(), 8);
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(report["risks"][0]["question_id"], "bk-strategy");
    assert_eq!(report["risks"][1]["question_id"], "rc-tests");

    let reference = parsed["reference"].as_str().unwrap();
    assert!(reference.starts_with("AUD-"));
}

#[test]
fn test_score_markdown_to_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("answers.toml"), CONTINUITY_ANSWERS).unwrap();

    let output = infraudit(
        dir.path(),
        &[
            "score",
            "continuity",
            "--answers",
            "answers.toml",
            "-f",
            "markdown",
            "-o",
            "audit.md",
            "--reference",
            "AUD-MD",
            "--no-emoji",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("audit.md"));

    let md = std::fs::read_to_string(dir.path().join("audit.md")).unwrap();
    assert!(md.starts_with("# Audit Report: Backup & Continuity"));
    assert!(md.contains("**Reference:** AUD-MD"));
    assert!(md.contains("## Action Plan"));
}

#[test]
fn test_score_digest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("answers.toml"), WORST_CONTINUITY_ANSWERS).unwrap();

    let output = infraudit(dir.path(), &["score", "continuity", "--answers", "answers.toml", "-f", "digest"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let digest = stdout(&output);
    assert!(digest.contains("Global score: 6/100, maturity: Initial"));
    assert!(digest.contains("Top risks (5 of 8):"));
}

#[test]
fn test_score_missing_answer_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("answers.toml"), "bk-strategy = \"a\"\n").unwrap();

    let output = infraudit(dir.path(), &["score", "continuity", "--answers", "answers.toml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Missing answer for question 'bk-frequency'"));
}

#[test]
fn test_score_unknown_option_fails() {
    let dir = tempfile::tempdir().unwrap();
    let answers = CONTINUITY_ANSWERS.replace("cp-power = \"a\"", "cp-power = \"z\"");
    std::fs::write(dir.path().join("answers.toml"), answers).unwrap();

    let output = infraudit(dir.path(), &["score", "continuity", "--answers", "answers.toml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cp-power"));
}

#[test]
fn test_score_bad_date_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("answers.toml"), CONTINUITY_ANSWERS).unwrap();

    let output = infraudit(
        dir.path(),
        &["score", "continuity", "--answers", "answers.toml", "--date", "04/05/2026"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid --date"));
}

#[test]
fn test_custom_catalog_from_flag() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("custom.toml"), CUSTOM_MODULE).unwrap();
    std::fs::write(dir.path().join("answers.toml"), "q1 = \"no\"\n").unwrap();

    let output = infraudit(
        dir.path(),
        &["score", "custom", "--catalog", "custom.toml", "--answers", "answers.toml", "-f", "json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["report"]["global_score"], 0);
    assert_eq!(parsed["report"]["risks"][0]["description"], "It is not fine");
}

#[test]
fn test_invalid_catalog_fails_before_any_command() {
    let dir = tempfile::tempdir().unwrap();
    let broken = CUSTOM_MODULE.replace("score = 10", "score = 11");
    std::fs::write(dir.path().join("broken.toml"), broken).unwrap();

    for args in [
        vec!["validate", "--catalog", "broken.toml"],
        vec!["modules", "--catalog", "broken.toml"],
    ] {
        let output = infraudit(dir.path(), &args);
        assert!(!output.status.success());
        let err = stderr(&output);
        assert!(err.contains("Invalid audit catalog"), "{err}");
        assert!(stdout(&output).is_empty());
    }
}

#[test]
fn test_config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("infraudit.toml"),
        "[export]\nreference_prefix = \"ACME\"\norganization = \"Acme Corp\"\n\n[defaults]\nformat = \"json\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("answers.toml"), CONTINUITY_ANSWERS).unwrap();

    let output = infraudit(dir.path(), &["score", "continuity", "--answers", "answers.toml"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(parsed["reference"].as_str().unwrap().starts_with("ACME-"));
    assert_eq!(parsed["organization"], "Acme Corp");
}

#[test]
fn test_init_writes_example_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = infraudit(dir.path(), &["init"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let written = std::fs::read_to_string(dir.path().join("infraudit.toml")).unwrap();
    assert!(written.contains("reference_prefix"));

    // The written example is itself a valid config
    let output = infraudit(dir.path(), &["validate"]);
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn test_init_ignores_broken_config_and_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.toml"), "[export\n").unwrap();

    let output = infraudit(
        dir.path(),
        &["--config", "broken.toml", "--catalog", "missing-catalog", "init"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(dir.path().join("infraudit.toml").exists());

    let output = infraudit(dir.path(), &["--config", "broken.toml", "modules"]);
    assert!(!output.status.success());
}
