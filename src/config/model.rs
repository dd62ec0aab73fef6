use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::measurement::{IMAGE, MeasurementScope};
use crate::rules::RulesProvider;

/// Current settings schema version.
pub const CONFIG_VERSION: &str = "4";

/// Placeholder used by persisted settings for "no selection".
pub const NONE: &str = "None";

pub const DEFAULT_CATEGORY: &str = "Metadata";
pub const DEFAULT_FEATURE_NAME: &str = "QCFlag";
pub const DEFAULT_RULES_FILE_NAME: &str = "rules.txt";

/// Class choices offered when the rules file cannot be read.
const FALLBACK_CLASS_COUNT: usize = 2;

// ============================================================================
// Choice enums (persisted as their display text in flat settings)
// ============================================================================

/// How the verdicts of a flag's criteria are merged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CombinationPolicy {
    /// "Flag if any fail"
    #[default]
    Any,
    /// "Flag if all fail"
    All,
}

impl CombinationPolicy {
    pub const ANY_TEXT: &'static str = "Flag if any fail";
    pub const ALL_TEXT: &'static str = "Flag if all fail";

    #[must_use]
    pub const fn setting_text(self) -> &'static str {
        match self {
            Self::Any => Self::ANY_TEXT,
            Self::All => Self::ALL_TEXT,
        }
    }

    #[must_use]
    pub fn from_setting_text(text: &str) -> Option<Self> {
        match text {
            Self::ANY_TEXT => Some(Self::Any),
            Self::ALL_TEXT => Some(Self::All),
            _ => None,
        }
    }
}

/// Where a criterion takes its values from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Image,
    AverageObject,
    AllObjects,
    Rules,
}

impl SourceKind {
    pub const IMAGE_TEXT: &'static str = "Whole-image measurement";
    pub const AVERAGE_OBJECT_TEXT: &'static str =
        "Average measurement for all objects in each image";
    pub const ALL_OBJECTS_TEXT: &'static str = "Measurements for all objects in each image";
    pub const RULES_TEXT: &'static str = "Rules";

    #[must_use]
    pub const fn setting_text(self) -> &'static str {
        match self {
            Self::Image => Self::IMAGE_TEXT,
            Self::AverageObject => Self::AVERAGE_OBJECT_TEXT,
            Self::AllObjects => Self::ALL_OBJECTS_TEXT,
            Self::Rules => Self::RULES_TEXT,
        }
    }

    #[must_use]
    pub fn from_setting_text(text: &str) -> Option<Self> {
        match text {
            Self::IMAGE_TEXT => Some(Self::Image),
            Self::AVERAGE_OBJECT_TEXT => Some(Self::AverageObject),
            Self::ALL_OBJECTS_TEXT => Some(Self::AllObjects),
            Self::RULES_TEXT => Some(Self::Rules),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_object_based(self) -> bool {
        matches!(self, Self::AverageObject | Self::AllObjects)
    }
}

/// Base folder a rules location is resolved against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationBase {
    #[default]
    DefaultInput,
    DefaultOutput,
    Elsewhere,
    DefaultInputSubfolder,
    DefaultOutputSubfolder,
}

impl LocationBase {
    const ALL: [Self; 5] = [
        Self::DefaultInput,
        Self::DefaultOutput,
        Self::Elsewhere,
        Self::DefaultInputSubfolder,
        Self::DefaultOutputSubfolder,
    ];

    #[must_use]
    pub const fn setting_text(self) -> &'static str {
        match self {
            Self::DefaultInput => "Default Input Folder",
            Self::DefaultOutput => "Default Output Folder",
            Self::Elsewhere => "Elsewhere...",
            Self::DefaultInputSubfolder => "Default Input Folder sub-folder",
            Self::DefaultOutputSubfolder => "Default Output Folder sub-folder",
        }
    }

    #[must_use]
    pub fn from_setting_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|base| base.setting_text() == text)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Folder reference for a rules file: a base folder plus an optional custom path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesLocation {
    #[serde(default)]
    pub base: LocationBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl RulesLocation {
    /// Encode as `"<base text>|<custom path or None>"`.
    #[must_use]
    pub fn to_setting_text(&self) -> String {
        format!(
            "{}|{}",
            self.base.setting_text(),
            self.path.as_deref().unwrap_or(NONE)
        )
    }

    /// Decode the `"<base text>|<custom path>"` form. A missing custom part
    /// and the `None` placeholder both decode to no custom path.
    #[must_use]
    pub fn from_setting_text(text: &str) -> Option<Self> {
        let (base, path) = text.split_once('|').unwrap_or((text, NONE));
        let base = LocationBase::from_setting_text(base)?;
        let path = (!path.is_empty() && path != NONE).then(|| path.to_string());
        Some(Self { base, path })
    }

    /// Resolve to a directory using the configured default folders.
    #[must_use]
    pub fn resolve(&self, paths: &PathsConfig) -> PathBuf {
        let custom = self.path.as_deref().unwrap_or("");
        match self.base {
            LocationBase::DefaultInput => paths.default_input.clone(),
            LocationBase::DefaultOutput => paths.default_output.clone(),
            LocationBase::Elsewhere => PathBuf::from(custom),
            LocationBase::DefaultInputSubfolder => paths.default_input.join(custom),
            LocationBase::DefaultOutputSubfolder => paths.default_output.join(custom),
        }
    }
}

/// Folders that rules locations resolve against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    #[serde(default = "default_folder")]
    pub default_input: PathBuf,

    #[serde(default = "default_folder")]
    pub default_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            default_input: default_folder(),
            default_output: default_folder(),
        }
    }
}

/// One measurement-based test contributing to a flag.
///
/// All fields are kept regardless of `source` so that switching the source
/// back and forth never loses user input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Criterion {
    #[serde(default)]
    pub source: SourceKind,

    /// Object type for object-based sources.
    #[serde(default = "default_object_name")]
    pub object_name: String,

    /// Feature name (for the image source, the full per-image feature name).
    #[serde(default)]
    pub measurement: String,

    #[serde(default = "default_true")]
    pub wants_minimum: bool,

    #[serde(default)]
    pub minimum_value: f64,

    #[serde(default = "default_true")]
    pub wants_maximum: bool,

    #[serde(default = "default_maximum_value")]
    pub maximum_value: f64,

    #[serde(default)]
    pub rules_location: RulesLocation,

    #[serde(default = "default_rules_file_name")]
    pub rules_file_name: String,

    /// Selected classes, 1-based.
    #[serde(default = "default_rules_classes")]
    pub rules_classes: Vec<usize>,
}

impl Default for Criterion {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            object_name: default_object_name(),
            measurement: String::new(),
            wants_minimum: true,
            minimum_value: 0.0,
            wants_maximum: true,
            maximum_value: default_maximum_value(),
            rules_location: RulesLocation::default(),
            rules_file_name: default_rules_file_name(),
            rules_classes: default_rules_classes(),
        }
    }
}

impl Criterion {
    /// Scope for threshold sources; `None` for rules.
    #[must_use]
    pub fn scope(&self) -> Option<MeasurementScope<'_>> {
        match self.source {
            SourceKind::Image => Some(MeasurementScope::Image),
            SourceKind::AverageObject => Some(MeasurementScope::AverageOf(&self.object_name)),
            SourceKind::AllObjects => Some(MeasurementScope::AllOf(&self.object_name)),
            SourceKind::Rules => None,
        }
    }

    /// Object the measurement is taken from.
    #[must_use]
    pub fn measured_object(&self) -> &str {
        if self.source == SourceKind::Image {
            IMAGE
        } else {
            &self.object_name
        }
    }

    /// Full path of the rules file.
    #[must_use]
    pub fn rules_path(&self, paths: &PathsConfig) -> PathBuf {
        self.rules_location
            .resolve(paths)
            .join(Path::new(&self.rules_file_name))
    }

    /// Class choices ("1".."n") offered for this criterion's rules file.
    ///
    /// The rules file is read on demand; any failure falls back to two classes.
    pub fn class_choices(&self, paths: &PathsConfig, provider: &dyn RulesProvider) -> Vec<String> {
        let path = self.rules_path(paths);
        let count = match provider.load(&path) {
            Ok(rules) if rules.class_count() > 0 => rules.class_count(),
            Ok(_) => FALLBACK_CLASS_COUNT,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using default class choices");
                FALLBACK_CLASS_COUNT
            }
        };
        (1..=count).map(|i| i.to_string()).collect()
    }
}

/// A named pass/fail decision recorded as a per-image integer measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flag {
    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_feature_name")]
    pub feature_name: String,

    #[serde(default)]
    pub combination: CombinationPolicy,

    /// Skip the remainder of the pipeline for flagged image sets.
    #[serde(default)]
    pub skip_on_fail: bool,

    #[serde(default, rename = "criterion")]
    pub criteria: Vec<Criterion>,
}

impl Default for Flag {
    fn default() -> Self {
        Self {
            category: default_category(),
            feature_name: default_feature_name(),
            combination: CombinationPolicy::default(),
            skip_on_fail: false,
            criteria: vec![Criterion::default()],
        }
    }
}

impl Flag {
    /// Name of the per-image measurement holding this flag's value.
    #[must_use]
    pub fn measurement_name(&self) -> String {
        format!("{}_{}", self.category, self.feature_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Settings schema version. Only the current version is accepted in TOML;
    /// older layouts go through the settings migrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default, rename = "flag")]
    pub flags: Vec<Flag>,
}

impl Config {
    /// Config holding the given flags under the current schema version.
    #[must_use]
    pub fn with_flags(flags: Vec<Flag>) -> Self {
        Self {
            version: Some(CONFIG_VERSION.to_string()),
            paths: PathsConfig::default(),
            flags,
        }
    }
}

fn default_folder() -> PathBuf {
    PathBuf::from(".")
}

const fn default_true() -> bool {
    true
}

const fn default_maximum_value() -> f64 {
    1.0
}

fn default_object_name() -> String {
    NONE.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_feature_name() -> String {
    DEFAULT_FEATURE_NAME.to_string()
}

fn default_rules_file_name() -> String {
    DEFAULT_RULES_FILE_NAME.to_string()
}

fn default_rules_classes() -> Vec<usize> {
    vec![1]
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
