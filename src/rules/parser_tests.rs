use std::path::Path;

use super::*;

fn parse(content: &str) -> Result<Rules> {
    RulesParser::new().parse(content, Path::new("rules.txt"))
}

#[test]
fn parses_single_rule() {
    let rules =
        parse("IF (Image_ImageQuality_PowerLogLogSlope_DNA < -2.5, [0.79, -0.79], [-0.94, 0.94])")
            .unwrap();

    assert_eq!(rules.rules.len(), 1);
    let rule = &rules.rules[0];
    assert_eq!(rule.object_name, "Image");
    assert_eq!(rule.feature, "ImageQuality_PowerLogLogSlope_DNA");
    assert_eq!(rule.comparator, Comparator::Less);
    assert!((rule.threshold + 2.5).abs() < f64::EPSILON);
    assert_eq!(rule.weights_if_true, vec![0.79, -0.79]);
    assert_eq!(rule.weights_if_false, vec![-0.94, 0.94]);
}

#[test]
fn parses_multiple_rules_and_skips_blank_lines() {
    let content = "\
IF (Image_Focus > 0.5, [1, 0, 0], [0, 1, 0])

IF (Image_Intensity_Mean >= 0.1, [0, 0, 1], [0.5, 0.5, 0])
";
    let rules = parse(content).unwrap();
    assert_eq!(rules.rules.len(), 2);
    assert_eq!(rules.rules[1].comparator, Comparator::GreaterEqual);
    assert_eq!(rules.class_count(), 3);
}

#[test]
fn parses_rule_without_spaces_around_operator() {
    let rules = parse("IF (Image_Count_Nuclei<10, [1, -1], [-1, 1])").unwrap();
    assert_eq!(rules.rules[0].feature, "Count_Nuclei");
    assert!((rules.rules[0].threshold - 10.0).abs() < f64::EPSILON);
}

#[test]
fn keeps_object_prefix_for_object_rules() {
    let rules = parse("IF (Nuclei_AreaShape_Area > 100, [1, 0], [0, 1])").unwrap();
    assert_eq!(rules.rules[0].object_name, "Nuclei");
    assert_eq!(rules.rules[0].feature, "AreaShape_Area");
}

#[test]
fn empty_content_yields_no_rules() {
    let rules = parse("\n\n").unwrap();
    assert!(rules.rules.is_empty());
    assert_eq!(rules.class_count(), 0);
}

#[test]
fn malformed_line_reports_line_number() {
    let content = "IF (Image_Focus > 0.5, [1, 0], [0, 1])\nthis is not a rule";
    let err = parse(content).unwrap_err();
    assert!(matches!(err, QcGuardError::RulesParse { line: 2, .. }));
}

#[test]
fn mismatched_weight_lengths_rejected() {
    let err = parse("IF (Image_Focus > 0.5, [1, 0, 0], [0, 1])").unwrap_err();
    assert!(matches!(
        err,
        QcGuardError::RulesParse { ref message, .. } if message.contains("differ in length")
    ));
}

#[test]
fn class_count_must_agree_across_rules() {
    let content = "IF (Image_A > 0, [1, 0], [0, 1])\nIF (Image_B > 0, [1, 0, 0], [0, 1, 0])";
    let err = parse(content).unwrap_err();
    assert!(matches!(err, QcGuardError::RulesParse { line: 2, .. }));
}

#[test]
fn non_numeric_threshold_rejected() {
    let err = parse("IF (Image_Focus > high, [1, 0], [0, 1])").unwrap_err();
    assert!(matches!(
        err,
        QcGuardError::RulesParse { ref message, .. } if message.contains("not a number")
    ));
}
