//! Typed records for each historical settings layout.
//!
//! Values stay as their persisted strings so a migration never reformats
//! numbers or names the user entered.

use crate::config::{DEFAULT_RULES_FILE_NAME, RulesLocation, SourceKind};
use crate::error::{QcGuardError, Result};

use super::cursor::Cursor;
use super::{
    N_FIXED_SETTINGS_PER_FLAG_V1, N_SETTINGS_PER_MEASUREMENT, N_SETTINGS_PER_MEASUREMENT_V2,
    N_SETTINGS_PER_MEASUREMENT_V3, NO,
};

/// Source names written by the first schema generation.
const V1_SOURCE_ALL_OBJECTS_PREFIX: &str = "Measurement for all";
const V1_SOURCE_ALL_OBJECTS: &str = "All objects";
const V1_SOURCE_AVERAGE_OBJECT: &str = "Average for objects";
const V1_SOURCE_IMAGE: &str = "Image";

/// Class selected when a rules criterion is introduced by migration.
const DEFAULT_RULES_CLASS: &str = "1";

/// The six threshold fields shared by every layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdFields {
    pub object_name: String,
    pub measurement: String,
    pub wants_minimum: String,
    pub minimum_value: String,
    pub wants_maximum: String,
    pub maximum_value: String,
}

impl ThresholdFields {
    fn from_slice(fields: &[String]) -> Self {
        Self {
            object_name: fields[0].clone(),
            measurement: fields[1].clone(),
            wants_minimum: fields[2].clone(),
            minimum_value: fields[3].clone(),
            wants_maximum: fields[4].clone(),
            maximum_value: fields[5].clone(),
        }
    }

    fn encode(&self, out: &mut Vec<String>) {
        out.extend([
            self.object_name.clone(),
            self.measurement.clone(),
            self.wants_minimum.clone(),
            self.minimum_value.clone(),
            self.wants_maximum.clone(),
            self.maximum_value.clone(),
        ]);
    }
}

/// A measurement layout that can be read from a cursor.
pub trait MeasurementRecord: Sized {
    const WIDTH: usize;

    /// Build the record from exactly `WIDTH` values.
    ///
    /// # Errors
    /// Fails if a choice value is not recognized.
    fn from_slice(fields: &[String]) -> Result<Self>;
}

// ============================================================================
// V1: 7 fields per measurement, 4 per flag (no skip choice)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementV1 {
    /// Source choice as written by the first generation.
    pub source: String,
    pub thresholds: ThresholdFields,
}

impl MeasurementRecord for MeasurementV1 {
    const WIDTH: usize = N_SETTINGS_PER_MEASUREMENT_V2;

    fn from_slice(fields: &[String]) -> Result<Self> {
        Ok(Self {
            source: fields[0].clone(),
            thresholds: ThresholdFields::from_slice(&fields[1..]),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagV1 {
    pub category: String,
    pub feature_name: String,
    pub combination: String,
    pub measurements: Vec<MeasurementV1>,
}

impl FlagV1 {
    /// Read every flag of a version 1 list.
    ///
    /// # Errors
    /// Fails if the list is shorter or longer than its counts declare.
    pub fn decode_all(values: &[String]) -> Result<Vec<Self>> {
        let mut cursor = Cursor::new(values);
        let flag_count = cursor.count("flag count")?;
        let mut flags = Vec::new();
        for _ in 0..flag_count {
            let measurement_count = cursor.count("measurement count")?;
            let header = cursor.take(N_FIXED_SETTINGS_PER_FLAG_V1 - 1, "flag settings")?;
            let measurements = (0..measurement_count)
                .map(|_| {
                    cursor
                        .take(MeasurementV1::WIDTH, "measurement settings")
                        .and_then(MeasurementV1::from_slice)
                })
                .collect::<Result<Vec<_>>>()?;
            flags.push(Self {
                category: header[0].clone(),
                feature_name: header[1].clone(),
                combination: header[2].clone(),
                measurements,
            });
        }
        cursor.finish()?;
        Ok(flags)
    }

    /// Add the skip choice (off) and normalize the first-generation source names.
    ///
    /// # Errors
    /// Fails on a source name no generation ever wrote.
    pub fn upgrade(self) -> Result<FlagRecord<MeasurementV2>> {
        let measurements = self
            .measurements
            .into_iter()
            .map(|m| {
                Ok(MeasurementV2 {
                    source: normalize_v1_source(&m.source)?,
                    thresholds: m.thresholds,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FlagRecord {
            category: self.category,
            feature_name: self.feature_name,
            combination: self.combination,
            wants_skip: NO.to_string(),
            measurements,
        })
    }
}

fn normalize_v1_source(source: &str) -> Result<SourceKind> {
    if source.starts_with(V1_SOURCE_ALL_OBJECTS_PREFIX) || source == V1_SOURCE_ALL_OBJECTS {
        return Ok(SourceKind::AllObjects);
    }
    match source {
        V1_SOURCE_AVERAGE_OBJECT => Ok(SourceKind::AverageObject),
        V1_SOURCE_IMAGE => Ok(SourceKind::Image),
        other => SourceKind::from_setting_text(other).ok_or_else(|| {
            QcGuardError::SchemaMigration(format!("unknown measurement source '{other}'"))
        }),
    }
}

fn parse_source(text: &str) -> Result<SourceKind> {
    SourceKind::from_setting_text(text).ok_or_else(|| {
        QcGuardError::SchemaMigration(format!("unknown measurement source '{text}'"))
    })
}

// ============================================================================
// V2..V4: 5 fields per flag
// ============================================================================

/// A flag record for the layouts that carry the skip choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRecord<M> {
    pub category: String,
    pub feature_name: String,
    pub combination: String,
    pub wants_skip: String,
    pub measurements: Vec<M>,
}

impl<M: MeasurementRecord> FlagRecord<M> {
    /// Read every flag of a list whose measurements use layout `M`.
    ///
    /// # Errors
    /// Fails if the list is shorter or longer than its counts declare.
    pub fn decode_all(values: &[String]) -> Result<Vec<Self>> {
        let mut cursor = Cursor::new(values);
        let flag_count = cursor.count("flag count")?;
        let mut flags = Vec::new();
        for _ in 0..flag_count {
            let measurement_count = cursor.count("measurement count")?;
            let header = cursor.take(super::N_FIXED_SETTINGS_PER_FLAG - 1, "flag settings")?;
            let measurements = (0..measurement_count)
                .map(|_| {
                    cursor
                        .take(M::WIDTH, "measurement settings")
                        .and_then(M::from_slice)
                })
                .collect::<Result<Vec<_>>>()?;
            flags.push(Self {
                category: header[0].clone(),
                feature_name: header[1].clone(),
                combination: header[2].clone(),
                wants_skip: header[3].clone(),
                measurements,
            });
        }
        cursor.finish()?;
        Ok(flags)
    }

    fn map_measurements<N>(self, f: impl FnMut(M) -> N) -> FlagRecord<N> {
        FlagRecord {
            category: self.category,
            feature_name: self.feature_name,
            combination: self.combination,
            wants_skip: self.wants_skip,
            measurements: self.measurements.into_iter().map(f).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementV2 {
    pub source: SourceKind,
    pub thresholds: ThresholdFields,
}

impl MeasurementRecord for MeasurementV2 {
    const WIDTH: usize = N_SETTINGS_PER_MEASUREMENT_V2;

    fn from_slice(fields: &[String]) -> Result<Self> {
        Ok(Self {
            source: parse_source(&fields[0])?,
            thresholds: ThresholdFields::from_slice(&fields[1..]),
        })
    }
}

impl FlagRecord<MeasurementV2> {
    /// Add the rules file location and name with their defaults.
    #[must_use]
    pub fn upgrade(self) -> FlagRecord<MeasurementV3> {
        self.map_measurements(|m| MeasurementV3 {
            source: m.source,
            thresholds: m.thresholds,
            rules_directory: RulesLocation::default().to_setting_text(),
            rules_file_name: DEFAULT_RULES_FILE_NAME.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementV3 {
    pub source: SourceKind,
    pub thresholds: ThresholdFields,
    pub rules_directory: String,
    pub rules_file_name: String,
}

impl MeasurementRecord for MeasurementV3 {
    const WIDTH: usize = N_SETTINGS_PER_MEASUREMENT_V3;

    fn from_slice(fields: &[String]) -> Result<Self> {
        Ok(Self {
            source: parse_source(&fields[0])?,
            thresholds: ThresholdFields::from_slice(&fields[1..7]),
            rules_directory: fields[7].clone(),
            rules_file_name: fields[8].clone(),
        })
    }
}

impl FlagRecord<MeasurementV3> {
    /// Add the class selection, defaulting to the first class.
    #[must_use]
    pub fn upgrade(self) -> FlagRecord<MeasurementV4> {
        self.map_measurements(|m| MeasurementV4 {
            source: m.source,
            thresholds: m.thresholds,
            rules_directory: m.rules_directory,
            rules_file_name: m.rules_file_name,
            rules_class: DEFAULT_RULES_CLASS.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementV4 {
    pub source: SourceKind,
    pub thresholds: ThresholdFields,
    pub rules_directory: String,
    pub rules_file_name: String,
    pub rules_class: String,
}

impl MeasurementRecord for MeasurementV4 {
    const WIDTH: usize = N_SETTINGS_PER_MEASUREMENT;

    fn from_slice(fields: &[String]) -> Result<Self> {
        Ok(Self {
            source: parse_source(&fields[0])?,
            thresholds: ThresholdFields::from_slice(&fields[1..7]),
            rules_directory: fields[7].clone(),
            rules_file_name: fields[8].clone(),
            rules_class: fields[9].clone(),
        })
    }
}

impl MeasurementV4 {
    fn encode(&self, out: &mut Vec<String>) {
        out.push(self.source.setting_text().to_string());
        self.thresholds.encode(out);
        out.extend([
            self.rules_directory.clone(),
            self.rules_file_name.clone(),
            self.rules_class.clone(),
        ]);
    }
}

/// Write current-layout flags back to a flat list, flag count first.
#[must_use]
pub fn encode_v4(flags: &[FlagRecord<MeasurementV4>]) -> Vec<String> {
    let mut out = vec![flags.len().to_string()];
    for flag in flags {
        out.extend([
            flag.measurements.len().to_string(),
            flag.category.clone(),
            flag.feature_name.clone(),
            flag.combination.clone(),
            flag.wants_skip.clone(),
        ]);
        for measurement in &flag.measurements {
            measurement.encode(&mut out);
        }
    }
    out
}
