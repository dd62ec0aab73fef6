use std::fs;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::cli::Commands;
use crate::config::MockFileSystem;

// One version-2 flag: "Flag if any fail", no skip, one whole-image
// measurement on Focus with both bounds.
const V2_SETTINGS: &str = "version = 2
---
1
1
QC
Focus
Flag if any fail
No
Whole-image measurement
None
Focus
Yes
0.3
Yes
1
";

fn args_for(dir: &TempDir, content: &str, flat: bool) -> MigrateArgs {
    let input = dir.path().join("settings.txt");
    fs::write(&input, content).unwrap();
    MigrateArgs {
        input,
        output: None,
        flat,
    }
}

#[test]
fn migrates_to_toml_config() {
    let dir = TempDir::new().unwrap();
    let args = args_for(&dir, V2_SETTINGS, false);

    let output = migrate_settings(&RealFileSystem, &args).unwrap();
    let config: Config = toml::from_str(&output).unwrap();

    assert_eq!(config.version.as_deref(), Some("4"));
    assert_eq!(config.flags.len(), 1);
    assert_eq!(config.flags[0].measurement_name(), "QC_Focus");
    assert_eq!(config.flags[0].criteria[0].minimum_value, 0.3);
}

#[test]
fn migrates_to_current_flat_layout() {
    let dir = TempDir::new().unwrap();
    let args = args_for(&dir, V2_SETTINGS, true);

    let output = migrate_settings(&RealFileSystem, &args).unwrap();
    let settings = SettingsFile::parse(&output).unwrap();

    assert_eq!(settings.version, 4);
    assert!(!settings.legacy_import);
    assert_eq!(settings.values.len(), 1 + 5 + 10);
}

#[test]
fn malformed_settings_fail() {
    let dir = TempDir::new().unwrap();
    let args = args_for(&dir, "version = 2\n---\n1\n", false);

    assert!(matches!(
        migrate_settings(&RealFileSystem, &args),
        Err(QcGuardError::SchemaMigration(_))
    ));
}

#[test]
fn missing_input_is_file_access_error() {
    let dir = TempDir::new().unwrap();
    let args = MigrateArgs {
        input: dir.path().join("absent.txt"),
        output: None,
        flat: false,
    };

    assert!(matches!(
        migrate_settings(&RealFileSystem, &args),
        Err(QcGuardError::FileAccess { .. })
    ));
}

#[test]
fn reads_input_through_file_system() {
    let fs = MockFileSystem::new().with_file("/settings/old.txt", V2_SETTINGS);
    let args = MigrateArgs {
        input: "/settings/old.txt".into(),
        output: None,
        flat: true,
    };

    let output = migrate_settings(&fs, &args).unwrap();

    assert!(output.starts_with("version = 4\n---\n1\n"));
}

#[test]
fn run_migrate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("settings.txt");
    let output = dir.path().join("qc.toml");
    fs::write(&input, V2_SETTINGS).unwrap();
    let cli = Cli::parse_from([
        "qc-guard".to_string(),
        "migrate".to_string(),
        input.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ]);
    let Commands::Migrate(args) = &cli.command else {
        panic!("Expected Migrate command");
    };

    assert_eq!(run_migrate(args, &cli), EXIT_SUCCESS);
    assert!(fs::read_to_string(output).unwrap().contains("[[flag]]"));
}
