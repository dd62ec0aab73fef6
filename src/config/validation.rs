//! Configuration semantic validation.
//!
//! Validates that configuration values are semantically correct after parsing.
//! Rules files and measured columns are checked separately by the checker,
//! since they depend on data outside the configuration.

use indexmap::IndexSet;

use crate::config::{Config, Flag, NONE, SourceKind};
use crate::{QcGuardError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if no flags are defined, a flag has no criteria, flag
/// names collide, or a criterion is misconfigured.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    if config.flags.is_empty() {
        return Err(QcGuardError::Config(
            "no flags defined; add at least one [[flag]] table".to_string(),
        ));
    }
    validate_flag_names(config)?;
    for (i, flag) in config.flags.iter().enumerate() {
        validate_criteria(i, flag)?;
    }
    Ok(())
}

fn validate_flag_names(config: &Config) -> Result<()> {
    let mut seen = IndexSet::new();
    for flag in &config.flags {
        let name = flag.measurement_name();
        if !seen.insert(name.clone()) {
            return Err(QcGuardError::Config(format!(
                "flag name '{name}' is used more than once; each category and feature pair must be unique"
            )));
        }
    }
    Ok(())
}

fn validate_criteria(i: usize, flag: &Flag) -> Result<()> {
    if flag.criteria.is_empty() {
        return Err(QcGuardError::Config(format!(
            "flag[{i}] ({}) has no criteria",
            flag.measurement_name()
        )));
    }
    for (j, criterion) in flag.criteria.iter().enumerate() {
        let at = format!("flag[{i}].criterion[{j}]");
        if criterion.source.is_object_based()
            && (criterion.object_name.is_empty() || criterion.object_name == NONE)
        {
            return Err(QcGuardError::Config(format!(
                "{at}: an object name is required for '{}'",
                criterion.source.setting_text()
            )));
        }
        if criterion.source == SourceKind::Rules {
            if criterion.rules_classes.is_empty() {
                return Err(QcGuardError::Config(format!(
                    "{at}: select at least one rules class"
                )));
            }
            if let Some(zero) = criterion.rules_classes.iter().find(|&&c| c == 0) {
                return Err(QcGuardError::Config(format!(
                    "{at}: rules classes are numbered from 1, got {zero}"
                )));
            }
            continue;
        }
        if criterion.measurement.is_empty() {
            return Err(QcGuardError::Config(format!(
                "{at}: no measurement selected"
            )));
        }
        if criterion.wants_minimum
            && criterion.wants_maximum
            && criterion.minimum_value > criterion.maximum_value
        {
            return Err(QcGuardError::Config(format!(
                "{at}: minimum_value ({}) must not exceed maximum_value ({})",
                criterion.minimum_value, criterion.maximum_value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
