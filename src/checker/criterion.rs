use serde::Serialize;

use crate::config::Criterion;
use crate::error::Result;
use crate::measurement::{IMAGE, MeasurementScope, MeasurementStore, SourceValues};
use crate::rules::{ScoreMatrix, arg_max};

use super::RuleSets;

pub const NO_OBJECTS: &str = "No objects";
pub const NOT_APPLICABLE: &str = "--";
const RULES_LABEL: &str = "Rules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    #[must_use]
    pub const fn from_failed(failed: bool) -> Self {
        if failed { Self::Fail } else { Self::Pass }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

/// Display row for one evaluated criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionStats {
    /// "Image", "Ave. <object>" or "<object>".
    pub source: String,
    /// Feature name, or "Rules" for rules criteria.
    pub measurement: String,
    pub value: String,
    pub verdict: Verdict,
}

/// Range of values a threshold criterion compares against its bounds.
struct Summary {
    min: f64,
    max: f64,
    display: String,
    no_data: bool,
}

impl Summary {
    fn single(value: f64, display: String) -> Self {
        Self {
            min: value,
            max: value,
            display,
            no_data: false,
        }
    }

    fn empty() -> Self {
        Self {
            min: f64::NAN,
            max: f64::NAN,
            display: NO_OBJECTS.to_string(),
            no_data: true,
        }
    }
}

/// Evaluate one criterion against the current image set.
///
/// Returns `true` when the criterion passes, along with its display row.
///
/// # Errors
/// Propagates `MeasurementLookup` for missing measurements, and a config
/// error if a rules criterion has no prepared rule set.
pub fn evaluate_criterion(
    criterion: &Criterion,
    store: &dyn MeasurementStore,
    rule_sets: &RuleSets,
) -> Result<(bool, CriterionStats)> {
    let (failed, stats) = match criterion.scope() {
        Some(scope) => evaluate_threshold(criterion, scope, store)?,
        None => evaluate_rules(criterion, store, rule_sets)?,
    };
    tracing::debug!(
        source = %stats.source,
        measurement = %stats.measurement,
        value = %stats.value,
        verdict = stats.verdict.label(),
        "criterion evaluated"
    );
    Ok((!failed, stats))
}

fn evaluate_threshold(
    criterion: &Criterion,
    scope: MeasurementScope<'_>,
    store: &dyn MeasurementStore,
) -> Result<(bool, CriterionStats)> {
    let summary = match (scope, SourceValues::fetch(store, scope, &criterion.measurement)?) {
        (_, SourceValues::Scalar(value)) => Summary::single(value, rounded(value)),
        (_, SourceValues::Vector(values)) if values.is_empty() => Summary::empty(),
        (MeasurementScope::AverageOf(_), SourceValues::Vector(values)) => {
            let mean = mean(&values);
            Summary::single(mean, rounded(mean))
        }
        (_, SourceValues::Vector(values)) => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            // Every value is NaN: report NaN like a single missing value.
            let (min, max) = if min > max { (f64::NAN, f64::NAN) } else { (min, max) };
            #[allow(clippy::float_cmp)]
            let display = if min == max || min.is_nan() {
                min.to_string()
            } else {
                format!("{min:.3} - {max:.3}")
            };
            Summary {
                min,
                max,
                display,
                no_data: false,
            }
        }
    };

    let failed = summary.no_data
        || (criterion.wants_minimum && summary.min < criterion.minimum_value)
        || (criterion.wants_maximum && summary.max > criterion.maximum_value);

    Ok((
        failed,
        CriterionStats {
            source: scope.label(),
            measurement: criterion.measurement.clone(),
            value: summary.display,
            verdict: Verdict::from_failed(failed),
        },
    ))
}

fn evaluate_rules(
    criterion: &Criterion,
    store: &dyn MeasurementStore,
    rule_sets: &RuleSets,
) -> Result<(bool, CriterionStats)> {
    let scores = rule_sets.for_criterion(criterion)?.score(store)?;
    let (failed, value) = classify(&scores, &criterion.rules_classes);

    Ok((
        failed,
        CriterionStats {
            source: IMAGE.to_string(),
            measurement: RULES_LABEL.to_string(),
            value,
            verdict: Verdict::from_failed(failed),
        },
    ))
}

/// Assign each complete score row to its best class and fail when most rows
/// land in one of the selected (1-based) classes.
fn classify(scores: &ScoreMatrix, selected: &[usize]) -> (bool, String) {
    let assigned: Vec<usize> = scores.complete_rows().filter_map(arg_max).collect();
    let remaining = assigned.len();
    let hits = assigned
        .iter()
        .filter(|&&class| selected.contains(&(class + 1)))
        .count();
    let failed = hits > remaining - hits;
    let display = if remaining > 1 {
        format!("{hits} of {remaining}")
    } else {
        NOT_APPLICABLE.to_string()
    };
    (failed, display)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Display form of a value rounded to three decimals.
fn rounded(value: f64) -> String {
    ((value * 1000.0).round() / 1000.0).to_string()
}

#[cfg(test)]
#[path = "criterion_tests.rs"]
mod tests;
