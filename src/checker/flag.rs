use serde::Serialize;

use crate::config::{CombinationPolicy, Flag};
use crate::error::{QcGuardError, Result};
use crate::measurement::{IMAGE, MeasurementStore};

use super::{CriterionStats, RuleSets, evaluate_criterion};

/// Pipeline signal raised by flag evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    #[default]
    Continue,
    SkipRemainder,
}

/// A criterion display row prefixed with its flag's measurement name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagStats {
    pub flag_name: String,
    #[serde(flatten)]
    pub criterion: CriterionStats,
}

/// Outcome of evaluating one flag against one image set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagOutcome {
    pub flag_name: String,
    /// Aggregate verdict of the criteria under the flag's combination policy.
    pub ok: bool,
    /// Value written to the store: 0 when `ok`, otherwise 1.
    pub value: u8,
    pub stats: Vec<FlagStats>,
}

/// Evaluate a flag, record its value in the store and update the disposition.
///
/// The first criterion seeds the verdict. Each later criterion is merged
/// with OR under [`CombinationPolicy::All`] and with AND under
/// [`CombinationPolicy::Any`].
///
/// # Errors
/// Returns a config error for a flag without criteria and propagates
/// criterion evaluation failures.
pub fn evaluate_flag(
    flag: &Flag,
    store: &mut dyn MeasurementStore,
    rule_sets: &RuleSets,
    disposition: &mut Disposition,
) -> Result<FlagOutcome> {
    let flag_name = flag.measurement_name();
    let (first, rest) = flag.criteria.split_first().ok_or_else(|| {
        QcGuardError::Config(format!("flag '{flag_name}' has no criteria"))
    })?;

    let (mut ok, first_stats) = evaluate_criterion(first, &*store, rule_sets)?;
    let mut stats = vec![first_stats];
    for criterion in rest {
        let (criterion_ok, criterion_stats) = evaluate_criterion(criterion, &*store, rule_sets)?;
        stats.push(criterion_stats);
        ok = match flag.combination {
            CombinationPolicy::All => ok || criterion_ok,
            CombinationPolicy::Any => ok && criterion_ok,
        };
    }

    let value = u8::from(!ok);
    store.put_scalar(IMAGE, &flag_name, f64::from(value));
    if !ok && flag.skip_on_fail {
        *disposition = Disposition::SkipRemainder;
    }
    tracing::info!(flag = %flag_name, ok, value, "flag evaluated");

    Ok(FlagOutcome {
        stats: stats
            .into_iter()
            .map(|criterion| FlagStats {
                flag_name: flag_name.clone(),
                criterion,
            })
            .collect(),
        flag_name,
        ok,
        value,
    })
}

#[cfg(test)]
#[path = "flag_tests.rs"]
mod tests;
