//! Flat, versioned settings lists and their migration to the current layout.
//!
//! A settings list is a flag count followed, per flag, by a measurement count,
//! the remaining fixed flag fields and then fixed-width groups of measurement
//! fields. The widths changed across four schema generations:
//!
//! | version | per flag | per measurement | added                          |
//! |---------|----------|-----------------|--------------------------------|
//! | 1       | 4        | 7               |                                |
//! | 2       | 5        | 7               | skip choice                    |
//! | 3       | 5        | 9               | rules location, rules file     |
//! | 4       | 5        | 10              | rules class selection          |

mod codec;
mod cursor;
mod file;
mod legacy;
mod records;

pub use codec::{decode_flags, encode_flags};
pub use file::SettingsFile;

use crate::error::{QcGuardError, Result};

use records::{FlagRecord, FlagV1, MeasurementV2, MeasurementV3, MeasurementV4, encode_v4};

/// Current settings layout version.
pub const CURRENT_VERSION: u32 = 4;

/// Values preceding the flags (the flag count).
pub const N_FIXED_SETTINGS: usize = 1;

/// Values per flag, aside from its measurements, in version 1.
pub const N_FIXED_SETTINGS_PER_FLAG_V1: usize = 4;

/// Values per flag, aside from its measurements, from version 2 on.
pub const N_FIXED_SETTINGS_PER_FLAG: usize = 5;

/// Values per measurement in versions 1 and 2.
pub const N_SETTINGS_PER_MEASUREMENT_V2: usize = 7;

/// Values per measurement in version 3.
pub const N_SETTINGS_PER_MEASUREMENT_V3: usize = 9;

/// Values per measurement in the current version.
pub const N_SETTINGS_PER_MEASUREMENT: usize = 10;

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Migrate a persisted settings list to the current layout.
///
/// `legacy_import` marks lists written by the predecessor tool; those are first
/// mapped to version 1 and then follow the regular chain. The returned import
/// marker is always `false`.
///
/// # Errors
/// Returns `SchemaMigration` for unknown versions, unknown choice values, or a
/// list whose length does not match the counts it declares.
pub fn migrate(
    values: &[String],
    version: u32,
    legacy_import: bool,
) -> Result<(Vec<String>, u32, bool)> {
    let current = if legacy_import {
        let flags = legacy::import(values, version)?;
        tracing::debug!(version, "imported legacy settings as version 1");
        upgrade_from_v1(flags)?
    } else {
        match version {
            1 => upgrade_from_v1(FlagV1::decode_all(values)?)?,
            2 => upgrade_from_v2(FlagRecord::<MeasurementV2>::decode_all(values)?),
            3 => upgrade_from_v3(FlagRecord::<MeasurementV3>::decode_all(values)?),
            CURRENT_VERSION => FlagRecord::<MeasurementV4>::decode_all(values)?,
            other => {
                return Err(QcGuardError::SchemaMigration(format!(
                    "unsupported settings version {other}; versions 1 through {CURRENT_VERSION} are supported"
                )));
            }
        }
    };
    Ok((encode_v4(&current), CURRENT_VERSION, false))
}

fn upgrade_from_v1(flags: Vec<FlagV1>) -> Result<Vec<FlagRecord<MeasurementV4>>> {
    tracing::debug!("migrating settings from version 1 to 2");
    let flags = flags
        .into_iter()
        .map(FlagV1::upgrade)
        .collect::<Result<Vec<_>>>()?;
    Ok(upgrade_from_v2(flags))
}

fn upgrade_from_v2(flags: Vec<FlagRecord<MeasurementV2>>) -> Vec<FlagRecord<MeasurementV4>> {
    tracing::debug!("migrating settings from version 2 to 3");
    upgrade_from_v3(flags.into_iter().map(FlagRecord::<MeasurementV2>::upgrade).collect())
}

fn upgrade_from_v3(flags: Vec<FlagRecord<MeasurementV3>>) -> Vec<FlagRecord<MeasurementV4>> {
    tracing::debug!("migrating settings from version 3 to 4");
    flags
        .into_iter()
        .map(FlagRecord::<MeasurementV3>::upgrade)
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
