use std::fmt::Write;

use crate::config::Flag;
use crate::error::{QcGuardError, Result};

use super::{CURRENT_VERSION, decode_flags, encode_flags, migrate};

const HEADER_END: &str = "---";

/// A flat settings list as stored on disk.
///
/// ```text
/// version = 2
/// legacy = false
/// ---
/// 1
/// 1
/// Metadata
/// ...
/// ```
///
/// Header lines are `key = value`; each value after the `---` separator is
/// one line, so empty values are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub version: u32,
    pub legacy_import: bool,
    pub values: Vec<String>,
}

impl SettingsFile {
    /// Parse the on-disk form.
    ///
    /// # Errors
    /// Returns `SchemaMigration` if the header is missing or malformed.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let mut version = None;
        let mut legacy_import = false;

        loop {
            let line = lines.next().ok_or_else(|| {
                QcGuardError::SchemaMigration(format!(
                    "settings header is not terminated by '{HEADER_END}'"
                ))
            })?;
            let line = line.trim();
            if line == HEADER_END {
                break;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                QcGuardError::SchemaMigration(format!("malformed settings header line '{line}'"))
            })?;
            let value = value.trim();
            match key.trim() {
                "version" => {
                    version = Some(value.parse::<u32>().map_err(|_| {
                        QcGuardError::SchemaMigration(format!("invalid settings version '{value}'"))
                    })?);
                }
                "legacy" => {
                    legacy_import = value.parse::<bool>().map_err(|_| {
                        QcGuardError::SchemaMigration(format!("invalid legacy marker '{value}'"))
                    })?;
                }
                other => {
                    return Err(QcGuardError::SchemaMigration(format!(
                        "unknown settings header key '{other}'"
                    )));
                }
            }
        }

        let version = version.ok_or_else(|| {
            QcGuardError::SchemaMigration("settings header has no version".to_string())
        })?;

        Ok(Self {
            version,
            legacy_import,
            values: lines.map(str::to_string).collect(),
        })
    }

    /// Current-layout settings for the given flags.
    #[must_use]
    pub fn from_flags(flags: &[Flag]) -> Self {
        Self {
            version: CURRENT_VERSION,
            legacy_import: false,
            values: encode_flags(flags),
        }
    }

    /// Migrate to the current layout.
    ///
    /// # Errors
    /// Propagates migration failures.
    pub fn migrate(&self) -> Result<Self> {
        let (values, version, legacy_import) =
            migrate(&self.values, self.version, self.legacy_import)?;
        Ok(Self {
            version,
            legacy_import,
            values,
        })
    }

    /// Migrate and decode into typed flags.
    ///
    /// # Errors
    /// Propagates migration and decoding failures.
    pub fn to_flags(&self) -> Result<Vec<Flag>> {
        decode_flags(&self.migrate()?.values)
    }

    /// Render the on-disk form.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "version = {}", self.version);
        if self.legacy_import {
            output.push_str("legacy = true\n");
        }
        output.push_str(HEADER_END);
        output.push('\n');
        for value in &self.values {
            output.push_str(value);
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
