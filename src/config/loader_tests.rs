use std::path::{Path, PathBuf};

use super::*;
use crate::config::{CombinationPolicy, MockFileSystem, SourceKind};

const FLAG_TOML: &str = r#"
version = "4"

[[flag]]
category = "QC"
feature_name = "Focus"

[[flag.criterion]]
measurement = "ImageQuality_FocusScore"
minimum_value = 0.2
"#;

#[test]
fn returns_default_when_no_config_found() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let config = loader.load().unwrap();

    assert!(config.flags.is_empty());
    assert_eq!(config.paths.default_input, PathBuf::from("."));
}

#[test]
fn loads_local_config_from_current_directory() {
    let fs = MockFileSystem::new()
        .with_current_dir("/my/project")
        .with_file("/my/project/.qc-guard.toml", FLAG_TOML);

    let config = FileConfigLoader::with_fs(fs).load().unwrap();

    assert_eq!(config.flags.len(), 1);
    assert_eq!(config.flags[0].measurement_name(), "QC_Focus");
}

#[test]
fn loads_user_config_as_fallback() {
    let fs = MockFileSystem::new()
        .with_config_dir(Some(PathBuf::from("/home/tester/.config/qc-guard")))
        .with_file("/home/tester/.config/qc-guard/config.toml", FLAG_TOML);

    let config = FileConfigLoader::with_fs(fs).load().unwrap();

    assert_eq!(config.flags.len(), 1);
}

#[test]
fn local_config_takes_priority_over_user_config() {
    let user = FLAG_TOML.replace("Focus\"", "Saturation\"");
    let fs = MockFileSystem::new()
        .with_file("/project/.qc-guard.toml", FLAG_TOML)
        .with_file("/home/user/.config/qc-guard/config.toml", &user);

    let config = FileConfigLoader::with_fs(fs).load().unwrap();

    assert_eq!(config.flags[0].feature_name, "Focus");
}

#[test]
fn toml_defaults_fill_missing_fields() {
    let fs = MockFileSystem::new().with_file("/qc.toml", FLAG_TOML);

    let config = FileConfigLoader::with_fs(fs)
        .load_from_path(Path::new("/qc.toml"))
        .unwrap();

    let flag = &config.flags[0];
    assert_eq!(flag.combination, CombinationPolicy::Any);
    assert!(!flag.skip_on_fail);
    let criterion = &flag.criteria[0];
    assert_eq!(criterion.source, SourceKind::Image);
    assert!(criterion.wants_minimum);
    assert!(criterion.wants_maximum);
    assert!((criterion.maximum_value - 1.0).abs() < f64::EPSILON);
    assert_eq!(criterion.rules_file_name, "rules.txt");
    assert_eq!(criterion.rules_classes, vec![1]);
}

#[test]
fn unsupported_version_returns_error() {
    let content = FLAG_TOML.replace("version = \"4\"", "version = \"2\"");
    let fs = MockFileSystem::new().with_file("/qc.toml", &content);

    let err = FileConfigLoader::with_fs(fs)
        .load_from_path(Path::new("/qc.toml"))
        .unwrap_err();

    assert!(matches!(err, QcGuardError::Config(ref msg) if msg.contains("Unsupported config version '2'")));
}

#[test]
fn invalid_toml_returns_parse_error() {
    let fs = MockFileSystem::new().with_file("/qc.toml", "[[flag]\n");

    let err = FileConfigLoader::with_fs(fs)
        .load_from_path(Path::new("/qc.toml"))
        .unwrap_err();

    assert!(matches!(err, QcGuardError::TomlParse(_)));
}

#[test]
fn missing_file_returns_file_access_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let err = loader.load_from_path(Path::new("/missing.toml")).unwrap_err();

    assert!(matches!(err, QcGuardError::FileAccess { .. }));
}

#[test]
fn flat_settings_file_is_migrated() {
    let content = "\
version = 1
---
1
1
QC
Cells
Flag if all fail
Average for objects
Nuclei
AreaShape_Area
Yes
10
No
1
";
    let fs = MockFileSystem::new().with_file("/old/settings.txt", content);

    let config = FileConfigLoader::with_fs(fs)
        .load_from_path(Path::new("/old/settings.txt"))
        .unwrap();

    assert_eq!(config.version.as_deref(), Some("4"));
    let flag = &config.flags[0];
    assert_eq!(flag.combination, CombinationPolicy::All);
    assert_eq!(flag.criteria[0].source, SourceKind::AverageObject);
    assert_eq!(flag.criteria[0].object_name, "Nuclei");
    assert!((flag.criteria[0].minimum_value - 10.0).abs() < f64::EPSILON);
}

#[test]
fn malformed_flat_settings_fail_to_load() {
    let fs = MockFileSystem::new().with_file("/settings.txt", "version = 2\n---\n2\n");

    let err = FileConfigLoader::with_fs(fs)
        .load_from_path(Path::new("/settings.txt"))
        .unwrap_err();

    assert!(matches!(err, QcGuardError::SchemaMigration(_)));
}
