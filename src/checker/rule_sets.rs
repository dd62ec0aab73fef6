use std::path::PathBuf;

use indexmap::IndexMap;

use crate::config::{Config, Criterion, PathsConfig, SourceKind};
use crate::error::{QcGuardError, Result};
use crate::measurement::IMAGE;
use crate::rules::{Rules, RulesProvider};

/// Rule sets for every rules criterion of a configuration, loaded and
/// validated once before any image set is evaluated.
#[derive(Debug, Clone, Default)]
pub struct RuleSets {
    paths: PathsConfig,
    sets: IndexMap<PathBuf, Rules>,
}

impl RuleSets {
    /// Load the rules file of every rules criterion.
    ///
    /// When `measured` is given, every feature a rule reads must be among
    /// those per-image columns.
    ///
    /// # Errors
    /// Returns `Validation` naming the rules file if it is missing, empty,
    /// targets a non-image object or reads an unmeasured feature.
    pub fn load(
        config: &Config,
        provider: &dyn RulesProvider,
        measured: Option<&[String]>,
    ) -> Result<Self> {
        let mut sets = IndexMap::new();
        let rules_criteria = config
            .flags
            .iter()
            .flat_map(|flag| &flag.criteria)
            .filter(|criterion| criterion.source == SourceKind::Rules);

        for criterion in rules_criteria {
            let path = criterion.rules_path(&config.paths);
            if sets.contains_key(&path) {
                continue;
            }
            let rules = provider.load(&path)?;
            validate_rules(criterion, &rules, measured)?;
            sets.insert(path, rules);
        }

        Ok(Self {
            paths: config.paths.clone(),
            sets,
        })
    }

    /// The prepared rule set for a rules criterion.
    ///
    /// # Errors
    /// Returns a config error if the criterion's rules file was not loaded.
    pub fn for_criterion(&self, criterion: &Criterion) -> Result<&Rules> {
        let path = criterion.rules_path(&self.paths);
        self.sets.get(&path).ok_or_else(|| {
            QcGuardError::Config(format!("rules file {} was not loaded", path.display()))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

fn validate_rules(criterion: &Criterion, rules: &Rules, measured: Option<&[String]>) -> Result<()> {
    let setting = &criterion.rules_file_name;
    if rules.rules.is_empty() {
        return Err(QcGuardError::validation(setting, "The rules file contains no rules"));
    }
    if let Some(rule) = rules.rules.iter().find(|rule| rule.object_name != IMAGE) {
        return Err(QcGuardError::validation(
            setting,
            format!(
                "Rules must measure {IMAGE} features, but a rule uses {}_{}",
                rule.object_name, rule.feature
            ),
        ));
    }
    if let Some(measured) = measured
        && let Some(missing) = rules
            .features()
            .into_iter()
            .find(|feature| !measured.iter().any(|column| column == feature))
    {
        return Err(QcGuardError::validation(
            setting,
            format!("The rules use {IMAGE}_{missing}, which is not measured before flagging"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "rule_sets_tests.rs"]
mod tests;
