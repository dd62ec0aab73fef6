use std::path::Path;

use crate::checker::FlagChecker;
use crate::cli::{ConfigAction, ConfigOutputFormat};
use crate::config::{Config, ConfigLoader, FileConfigLoader, RealFileSystem, SourceKind};
use crate::error::{QcGuardError, Result};
use crate::measurement::MeasurementsFile;
use crate::output::print_error;
use crate::rules::FileRulesProvider;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::load_config;

#[must_use]
pub fn run_config(args: &crate::cli::ConfigArgs) -> i32 {
    match &args.action {
        ConfigAction::Validate {
            config,
            measurements,
        } => run_config_validate(config, measurements.as_deref()),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), *format),
    }
}

fn run_config_validate(config_path: &Path, measurements: Option<&Path>) -> i32 {
    match run_config_validate_impl(config_path, measurements) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates a configuration file and the rules files its flags read.
///
/// With a measurements file, rules may only use the image columns it records.
///
/// # Errors
/// Returns an error if the file doesn't exist, cannot be parsed, or fails validation.
pub fn run_config_validate_impl(config_path: &Path, measurements: Option<&Path>) -> Result<()> {
    if !config_path.exists() {
        return Err(QcGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = FileConfigLoader::new().load_from_path(config_path)?;
    let measured = measurements
        .map(|path| MeasurementsFile::load(&RealFileSystem, path))
        .transpose()?
        .map(|file| file.measured_features());

    FlagChecker::prepare(config, &FileRulesProvider::new(), measured.as_deref())?;
    Ok(())
}

fn run_config_show(config_path: Option<&Path>, format: ConfigOutputFormat) -> i32 {
    match run_config_show_impl(config_path, format) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Renders the effective configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or serialized.
pub fn run_config_show_impl(config_path: Option<&Path>, format: ConfigOutputFormat) -> Result<String> {
    let config = load_config(config_path)?;

    match format {
        ConfigOutputFormat::Json => {
            let mut output = serde_json::to_string_pretty(&config)?;
            output.push('\n');
            Ok(output)
        }
        ConfigOutputFormat::Text => Ok(format_config_text(&config)),
    }
}

#[must_use]
pub fn format_config_text(config: &Config) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n\n");

    output.push_str("[paths]\n");
    let _ = writeln!(output, "  default_input = \"{}\"", config.paths.default_input.display());
    let _ = writeln!(output, "  default_output = \"{}\"", config.paths.default_output.display());

    if config.flags.is_empty() {
        output.push_str("\n(no flags defined)\n");
        return output;
    }

    for flag in &config.flags {
        let _ = writeln!(output, "\n[[flag]]  # {}", flag.measurement_name());
        let _ = writeln!(output, "  combination = \"{}\"", flag.combination.setting_text());
        let _ = writeln!(output, "  skip_on_fail = {}", flag.skip_on_fail);

        for criterion in &flag.criteria {
            let _ = writeln!(output, "  - {}", criterion.source.setting_text());
            if criterion.source == SourceKind::Rules {
                let _ = writeln!(
                    output,
                    "      rules = \"{}\"",
                    criterion.rules_path(&config.paths).display()
                );
                let _ = writeln!(output, "      classes = {:?}", criterion.rules_classes);
                continue;
            }
            if criterion.source.is_object_based() {
                let _ = writeln!(output, "      object = \"{}\"", criterion.object_name);
            }
            let _ = writeln!(output, "      measurement = \"{}\"", criterion.measurement);
            if criterion.wants_minimum {
                let _ = writeln!(output, "      minimum = {}", criterion.minimum_value);
            }
            if criterion.wants_maximum {
                let _ = writeln!(output, "      maximum = {}", criterion.maximum_value);
            }
        }
    }

    output
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
