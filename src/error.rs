use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QcGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Raised before a run; `setting` identifies the offending setting value
    /// (typically the rules file name) so the user can correct it.
    #[error("Validation error in '{setting}': {message}")]
    Validation { setting: String, message: String },

    #[error("Measurement not found: {object}.{feature}")]
    MeasurementLookup { object: String, feature: String },

    #[error("Settings migration error: {0}")]
    SchemaMigration(String),

    #[error("Invalid rule at {}:{line}: {message}", path.display())]
    RulesParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to access file: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QcGuardError {
    pub fn validation(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            setting: setting.into(),
            message: message.into(),
        }
    }

    pub fn lookup(object: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::MeasurementLookup {
            object: object.into(),
            feature: feature.into(),
        }
    }

    /// Short category name used when rendering errors on the command line.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::Validation { .. } => "Validation",
            Self::MeasurementLookup { .. } => "Measurement",
            Self::SchemaMigration(_) => "Migration",
            Self::RulesParse { .. } => "Rules",
            Self::FileAccess { .. } | Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::Json(_) => "JSON",
        }
    }

    /// The error payload without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::SchemaMigration(msg) => msg.clone(),
            Self::Validation { message, .. } | Self::RulesParse { message, .. } => message.clone(),
            Self::MeasurementLookup { object, feature } => format!("{object}.{feature}"),
            Self::FileAccess { path, .. } => path.display().to_string(),
            Self::Io(e) => e.to_string(),
            Self::TomlParse(e) => e.to_string(),
            Self::TomlSerialize(e) => e.to_string(),
            Self::Json(e) => e.to_string(),
        }
    }

    /// Where the error came from, when that is not already in the message.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Validation { setting, .. } => Some(format!("setting: {setting}")),
            Self::RulesParse { path, line, .. } => Some(format!("{}:{line}", path.display())),
            Self::FileAccess { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QcGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
