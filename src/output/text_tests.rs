use super::*;
use crate::checker::{CriterionStats, FlagOutcome, FlagStats, Verdict};

fn row(flag_name: &str, value: &str, verdict: Verdict) -> FlagStats {
    FlagStats {
        flag_name: flag_name.to_string(),
        criterion: CriterionStats {
            source: "Image".to_string(),
            measurement: "Focus".to_string(),
            value: value.to_string(),
            verdict,
        },
    }
}

fn image_set(image_set: usize, value: &str, passed: bool, disposition: Disposition) -> ImageSetReport {
    let verdict = if passed { Verdict::Pass } else { Verdict::Fail };
    ImageSetReport {
        image_set,
        disposition,
        flags: vec![FlagOutcome {
            flag_name: "QC_Focus".to_string(),
            ok: passed,
            value: u8::from(!passed),
            stats: vec![row("QC_Focus", value, verdict)],
        }],
    }
}

fn sample_report() -> RunReport {
    RunReport {
        image_sets: vec![
            image_set(1, "0.5", true, Disposition::Continue),
            image_set(2, "0.05", false, Disposition::SkipRemainder),
        ],
    }
}

#[test]
fn renders_aligned_table() {
    let output = TextFormatter::new(ColorMode::Never)
        .format(&sample_report())
        .unwrap();

    assert!(output.starts_with("Image set  QC_Focus  Pass/Fail\n1          0.5       Pass\n2          0.05      Fail\n"));
}

#[test]
fn lists_flagged_sets_with_failing_rows() {
    let output = TextFormatter::new(ColorMode::Never)
        .format(&sample_report())
        .unwrap();

    assert!(output.contains("✗ FLAGGED: image set 2"));
    assert!(output.contains("   QC_Focus = 1"));
    assert!(output.contains("     Image Focus: 0.05 (Fail)"));
    assert!(output.contains("Remaining processing skipped"));
    assert!(!output.contains("PASSED: image set 1"));
}

#[test]
fn verbose_lists_passing_sets() {
    let output = TextFormatter::with_verbose(ColorMode::Never, 1)
        .format(&sample_report())
        .unwrap();

    assert!(output.contains("✓ PASSED: image set 1"));
    assert!(output.contains("     Image Focus: 0.5 (Pass)"));
}

#[test]
fn summary_counts_flagged_sets() {
    let output = TextFormatter::new(ColorMode::Never)
        .format(&sample_report())
        .unwrap();

    assert!(output.ends_with("Summary: 2 image sets checked, 1 passed, 1 flagged\n"));
}

#[test]
fn colors_applied_when_forced() {
    let output = TextFormatter::new(ColorMode::Always)
        .format(&sample_report())
        .unwrap();

    assert!(output.contains("\x1b[31mFLAGGED\x1b[0m"));
    assert!(output.contains("\x1b[32m1\x1b[0m passed"));
}

#[test]
fn empty_report_prints_only_summary() {
    let output = TextFormatter::new(ColorMode::Never)
        .format(&RunReport::default())
        .unwrap();

    assert_eq!(output, "Summary: 0 image sets checked, 0 passed, 0 flagged\n");
}
