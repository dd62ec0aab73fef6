use std::path::PathBuf;

use super::*;

fn render(output: &ErrorOutput, error: &QcGuardError) -> String {
    let mut buffer = Vec::new();
    output.write_error(
        &mut buffer,
        error.error_type(),
        &error.message(),
        error.detail().as_deref(),
    );
    String::from_utf8(buffer).unwrap()
}

#[test]
fn plain_error_without_detail() {
    let output = ErrorOutput::new(ColorMode::Never);
    let text = render(&output, &QcGuardError::Config("no flags defined".to_string()));
    assert_eq!(text, "✖ Config: no flags defined\n");
}

#[test]
fn validation_error_names_setting() {
    let output = ErrorOutput::new(ColorMode::Never);
    let error = QcGuardError::validation("rules.txt", "No such rules file: /in/rules.txt");
    let text = render(&output, &error);
    assert_eq!(
        text,
        "✖ Validation: No such rules file: /in/rules.txt\n  × setting: rules.txt\n"
    );
}

#[test]
fn rules_parse_error_points_at_line() {
    let output = ErrorOutput::new(ColorMode::Never);
    let error = QcGuardError::RulesParse {
        path: PathBuf::from("rules.txt"),
        line: 4,
        message: "not a rule: IF".to_string(),
    };
    assert!(render(&output, &error).contains("  × rules.txt:4"));
}

#[test]
fn colored_error_uses_ansi_codes() {
    let output = ErrorOutput::new(ColorMode::Always);
    let text = render(&output, &QcGuardError::Config("bad".to_string()));
    assert!(text.starts_with("\x1b[1m\x1b[31m✖ Config:\x1b[0m bad"));
}
