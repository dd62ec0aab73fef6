mod criterion;
mod flag;
mod report;
mod rule_sets;

pub use criterion::{CriterionStats, NO_OBJECTS, NOT_APPLICABLE, Verdict, evaluate_criterion};
pub use flag::{Disposition, FlagOutcome, FlagStats, evaluate_flag};
pub use report::{ImageSetReport, RunReport};
pub use rule_sets::RuleSets;

use rayon::prelude::*;

use crate::config::{Config, validate_config_semantics};
use crate::error::Result;
use crate::measurement::{IMAGE, ImageMeasurements, MeasurementStore, MeasurementsFile};
use crate::rules::RulesProvider;

/// Column type reported for flag measurements.
pub const COLTYPE_INTEGER: &str = "integer";

pub trait Checker {
    /// Evaluate every flag against one image set, recording each flag's
    /// value in the store.
    ///
    /// # Errors
    /// Propagates measurement lookup failures.
    fn check(&self, store: &mut dyn MeasurementStore) -> Result<(Disposition, Vec<FlagOutcome>)>;
}

/// Evaluates a validated configuration's flags.
#[derive(Debug, Clone)]
pub struct FlagChecker {
    config: Config,
    rule_sets: RuleSets,
}

impl FlagChecker {
    /// Validate the configuration and load its rules files.
    ///
    /// `measured` lists the per-image columns produced before flagging; when
    /// given, rules may only read those.
    ///
    /// # Errors
    /// Returns a config error for semantic problems and `Validation` for
    /// rules files that are missing or unusable.
    pub fn prepare(
        config: Config,
        provider: &dyn RulesProvider,
        measured: Option<&[String]>,
    ) -> Result<Self> {
        validate_config_semantics(&config)?;
        let rule_sets = RuleSets::load(&config, provider, measured)?;
        tracing::debug!(
            flags = config.flags.len(),
            rules_files = rule_sets.len(),
            "configuration prepared"
        );
        Ok(Self { config, rule_sets })
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// `(object, feature, type)` for every measurement the flags record.
    #[must_use]
    pub fn measurement_columns(&self) -> Vec<(&'static str, String, &'static str)> {
        self.config
            .flags
            .iter()
            .map(|flag| (IMAGE, flag.measurement_name(), COLTYPE_INTEGER))
            .collect()
    }

    /// Flag categories recorded for `object_name`.
    #[must_use]
    pub fn categories(&self, object_name: &str) -> Vec<&str> {
        if object_name != IMAGE {
            return Vec::new();
        }
        self.config
            .flags
            .iter()
            .map(|flag| flag.category.as_str())
            .collect()
    }

    /// Flag feature names recorded for `object_name` within `category`.
    #[must_use]
    pub fn measurements(&self, object_name: &str, category: &str) -> Vec<&str> {
        if object_name != IMAGE {
            return Vec::new();
        }
        self.config
            .flags
            .iter()
            .filter(|flag| flag.category == category)
            .map(|flag| flag.feature_name.as_str())
            .collect()
    }

    /// Evaluate every image set of a measurements file.
    ///
    /// Image sets are independent and evaluated in parallel, each on its own
    /// copy of the measurements; `on_image_set` is called as each finishes.
    ///
    /// # Errors
    /// Returns the first evaluation failure.
    pub fn run<F>(&self, file: &MeasurementsFile, on_image_set: F) -> Result<RunReport>
    where
        F: Fn() + Sync,
    {
        let image_sets = file
            .image_sets
            .par_iter()
            .enumerate()
            .map(|(index, measurements)| {
                let mut store: ImageMeasurements = measurements.clone();
                let (disposition, flags) = self.check(&mut store)?;
                on_image_set();
                Ok(ImageSetReport {
                    image_set: index + 1,
                    disposition,
                    flags,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RunReport { image_sets })
    }
}

impl Checker for FlagChecker {
    fn check(&self, store: &mut dyn MeasurementStore) -> Result<(Disposition, Vec<FlagOutcome>)> {
        let mut disposition = Disposition::Continue;
        let mut outcomes = Vec::with_capacity(self.config.flags.len());
        for flag in &self.config.flags {
            outcomes.push(evaluate_flag(
                flag,
                &mut *store,
                &self.rule_sets,
                &mut disposition,
            )?);
        }
        Ok((disposition, outcomes))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
