use super::*;

#[test]
fn progress_bar_hidden_in_quiet_mode() {
    let progress = EvaluationProgress::new(100, true);
    progress.inc();
    progress.inc();
    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn progress_bar_clone_shares_counter() {
    let progress = EvaluationProgress::new(100, true);
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn visible_progress_bar_counts() {
    let progress = EvaluationProgress::new_with_visibility(3, false, true);
    for _ in 0..3 {
        progress.inc();
    }
    assert_eq!(progress.position(), 3);
    progress.finish();
}
