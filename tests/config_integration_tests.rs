//! Integration tests for the `config` and `classes` commands.

mod common;

use common::{BASIC_CONFIG, RULES_CONFIG, TestFixture};
use predicates::prelude::*;

#[test]
fn config_validate_accepts_valid_file() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);

    qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn config_validate_reports_semantic_error() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
version = "4"

[[flag]]
[[flag.criterion]]
source = "average_object"
measurement = "AreaShape_Area"
"#,
    );

    qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate", "--color", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("object name is required"));
}

#[test]
fn config_validate_checks_rules_against_measurements() {
    let fixture = TestFixture::new();
    fixture.create_config(RULES_CONFIG);
    fixture.create_file("rules.txt", "IF (Image_Blur < 0.3, [1, 0], [0, 1])\n");
    fixture.create_measurements("run.json", &[(0.5, &[])]);

    qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .success();

    qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate", "-m", "run.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Image_Blur"));
}

#[test]
fn config_validate_missing_file() {
    let fixture = TestFixture::new();

    qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate", "-c", "absent.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_show_text() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);

    qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Effective Configuration ==="))
        .stdout(predicate::str::contains("[[flag]]  # QC_Focus"));
}

#[test]
fn config_show_json() {
    let fixture = TestFixture::new();
    fixture.create_config(BASIC_CONFIG);

    let output = qc_guard!()
        .current_dir(fixture.path())
        .args(["config", "show", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["flag"][0]["criterion"][1]["source"], "all_objects");
}

#[test]
fn classes_lists_rule_classes() {
    let fixture = TestFixture::new();
    fixture.create_config(RULES_CONFIG);
    fixture.create_file(
        "rules.txt",
        "IF (Image_ImageQuality_FocusScore < 0.3, [1, 0, 0], [0, 1, 1])\n",
    );

    qc_guard!()
        .current_dir(fixture.path())
        .args(["classes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QC_Classifier:"))
        .stdout(predicate::str::contains("-> [1] 2 3"));
}

#[test]
fn classes_fall_back_without_rules_file() {
    let fixture = TestFixture::new();
    fixture.create_config(RULES_CONFIG);

    qc_guard!()
        .current_dir(fixture.path())
        .args(["classes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> [1] 2"));
}
