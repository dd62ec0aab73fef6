use crate::config::{CombinationPolicy, Criterion, Flag, RulesLocation};
use crate::error::{QcGuardError, Result};

use super::records::{FlagRecord, MeasurementV4, ThresholdFields, encode_v4};
use super::{NO, YES};

/// Decode a current-layout settings list into typed flags.
///
/// # Errors
/// Returns `SchemaMigration` if the layout is inconsistent or a value cannot
/// be interpreted (unknown choice, non-numeric bound, bad class index).
pub fn decode_flags(values: &[String]) -> Result<Vec<Flag>> {
    FlagRecord::<MeasurementV4>::decode_all(values)?
        .into_iter()
        .map(flag_from_record)
        .collect()
}

/// Encode typed flags as a current-layout settings list.
#[must_use]
pub fn encode_flags(flags: &[Flag]) -> Vec<String> {
    let records: Vec<_> = flags.iter().map(record_from_flag).collect();
    encode_v4(&records)
}

fn flag_from_record(record: FlagRecord<MeasurementV4>) -> Result<Flag> {
    let combination = CombinationPolicy::from_setting_text(&record.combination).ok_or_else(|| {
        QcGuardError::SchemaMigration(format!(
            "unknown combination choice '{}'",
            record.combination
        ))
    })?;
    let criteria = record
        .measurements
        .into_iter()
        .map(criterion_from_record)
        .collect::<Result<Vec<_>>>()?;
    Ok(Flag {
        category: record.category,
        feature_name: record.feature_name,
        combination,
        skip_on_fail: parse_bool(&record.wants_skip)?,
        criteria,
    })
}

fn criterion_from_record(record: MeasurementV4) -> Result<Criterion> {
    let t = record.thresholds;
    let rules_location = RulesLocation::from_setting_text(&record.rules_directory).ok_or_else(|| {
        QcGuardError::SchemaMigration(format!(
            "unknown rules location '{}'",
            record.rules_directory
        ))
    })?;
    Ok(Criterion {
        source: record.source,
        object_name: t.object_name,
        measurement: t.measurement,
        wants_minimum: parse_bool(&t.wants_minimum)?,
        minimum_value: parse_float(&t.minimum_value)?,
        wants_maximum: parse_bool(&t.wants_maximum)?,
        maximum_value: parse_float(&t.maximum_value)?,
        rules_location,
        rules_file_name: record.rules_file_name,
        rules_classes: parse_classes(&record.rules_class)?,
    })
}

fn record_from_flag(flag: &Flag) -> FlagRecord<MeasurementV4> {
    FlagRecord {
        category: flag.category.clone(),
        feature_name: flag.feature_name.clone(),
        combination: flag.combination.setting_text().to_string(),
        wants_skip: bool_text(flag.skip_on_fail),
        measurements: flag.criteria.iter().map(record_from_criterion).collect(),
    }
}

fn record_from_criterion(criterion: &Criterion) -> MeasurementV4 {
    MeasurementV4 {
        source: criterion.source,
        thresholds: ThresholdFields {
            object_name: criterion.object_name.clone(),
            measurement: criterion.measurement.clone(),
            wants_minimum: bool_text(criterion.wants_minimum),
            minimum_value: criterion.minimum_value.to_string(),
            wants_maximum: bool_text(criterion.wants_maximum),
            maximum_value: criterion.maximum_value.to_string(),
        },
        rules_directory: criterion.rules_location.to_setting_text(),
        rules_file_name: criterion.rules_file_name.clone(),
        rules_class: criterion
            .rules_classes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn bool_text(value: bool) -> String {
    (if value { YES } else { NO }).to_string()
}

fn parse_bool(text: &str) -> Result<bool> {
    match text {
        YES => Ok(true),
        NO => Ok(false),
        other => Err(QcGuardError::SchemaMigration(format!(
            "expected '{YES}' or '{NO}', found '{other}'"
        ))),
    }
}

fn parse_float(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| QcGuardError::SchemaMigration(format!("'{text}' is not a number")))
}

fn parse_classes(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(class) if class >= 1 => Ok(class),
            _ => Err(QcGuardError::SchemaMigration(format!(
                "'{s}' is not a class number"
            ))),
        })
        .collect()
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
