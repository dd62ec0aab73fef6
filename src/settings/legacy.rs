//! Import of settings written by the predecessor quality-control tool.
//!
//! That tool stored a single image-measurement flag per module. Both of its
//! layouts map onto a one-flag, one-measurement version 1 record.

use crate::config::{CombinationPolicy, DEFAULT_CATEGORY, NONE, SourceKind};
use crate::error::{QcGuardError, Result};

use super::records::{FlagV1, MeasurementV1, ThresholdFields};
use super::{NO, YES};

const LEGACY_V1_WIDTH: usize = 8;
const LEGACY_V2_WIDTH: usize = 9;

const NO_MINIMUM: &str = "No minimum";
const NO_MAXIMUM: &str = "No maximum";
const APPEND_EXISTING_FLAG: &str = "Append existing flag";

/// Fields common to both legacy layouts.
struct LegacyFlag<'a> {
    measurement_name: String,
    min_value: &'a str,
    max_value: &'a str,
    new_or_append: &'a str,
    new_name: &'a str,
}

/// Convert a legacy settings list to version 1 flags.
///
/// # Errors
/// Fails for versions other than 1 and 2 or when the list has the wrong length.
pub fn import(values: &[String], version: u32) -> Result<Vec<FlagV1>> {
    let legacy = match (version, values) {
        (1, [image, category, feature, min, max, new_or_append, new_name, _old_name]) => {
            LegacyFlag {
                measurement_name: [category.as_str(), feature.as_str(), image.as_str()].join("_"),
                min_value: min,
                max_value: max,
                new_or_append,
                new_name,
            }
        }
        (2, [image, category, feature, scale, min, max, new_or_append, new_name, _old_name]) => {
            LegacyFlag {
                measurement_name: [
                    category.as_str(),
                    feature.as_str(),
                    image.as_str(),
                    scale.as_str(),
                ]
                .join("_"),
                min_value: min,
                max_value: max,
                new_or_append,
                new_name,
            }
        }
        (1, _) => return Err(width_error(values, LEGACY_V1_WIDTH, version)),
        (2, _) => return Err(width_error(values, LEGACY_V2_WIDTH, version)),
        (other, _) => {
            return Err(QcGuardError::SchemaMigration(format!(
                "unsupported legacy import version {other}"
            )));
        }
    };
    Ok(vec![legacy.into_flag()])
}

fn width_error(values: &[String], width: usize, version: u32) -> QcGuardError {
    QcGuardError::SchemaMigration(format!(
        "legacy version {version} settings have {width} values, found {}",
        values.len()
    ))
}

impl LegacyFlag<'_> {
    fn into_flag(self) -> FlagV1 {
        let (wants_minimum, minimum_value) = bound(self.min_value, NO_MINIMUM, "0");
        let (wants_maximum, maximum_value) = bound(self.max_value, NO_MAXIMUM, "1");

        if self.new_or_append == APPEND_EXISTING_FLAG {
            tracing::warn!(
                flag = self.new_name,
                "legacy flags appended across modules cannot be combined; importing as a new flag"
            );
        }

        let (category, feature_name) = match self.new_name.split_once('_') {
            Some((category, feature)) => (category.to_string(), feature.to_string()),
            None => (DEFAULT_CATEGORY.to_string(), self.new_name.to_string()),
        };

        FlagV1 {
            category,
            feature_name,
            combination: CombinationPolicy::Any.setting_text().to_string(),
            measurements: vec![MeasurementV1 {
                source: SourceKind::Image.setting_text().to_string(),
                thresholds: ThresholdFields {
                    object_name: NONE.to_string(),
                    measurement: self.measurement_name,
                    wants_minimum,
                    minimum_value,
                    wants_maximum,
                    maximum_value,
                },
            }],
        }
    }
}

/// Map a legacy bound ("No minimum" / a number) to its enable flag and value.
fn bound(value: &str, disabled: &str, fallback: &str) -> (String, String) {
    if value == disabled {
        (NO.to_string(), fallback.to_string())
    } else {
        (YES.to_string(), value.to_string())
    }
}
