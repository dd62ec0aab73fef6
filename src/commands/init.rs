use std::fs;

use crate::error::{QcGuardError, Result};
use crate::output::print_error;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

#[must_use]
pub fn run_init(args: &crate::cli::InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &crate::cli::InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(QcGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> &'static str {
    r#"# qc-guard configuration file
version = "4"

# Folders that rules file locations resolve against
[paths]
default_input = "."
default_output = "."

# Each flag is recorded per image set as <category>_<feature_name>:
# 0 when the image set passes, 1 when it is flagged.
[[flag]]
category = "Metadata"
feature_name = "QCFlag"
# "any": flag when any criterion fails; "all": flag only when all fail
combination = "any"
# Skip the rest of the processing for flagged image sets
skip_on_fail = false

# Sources: "image", "average_object", "all_objects", "rules"
[[flag.criterion]]
source = "image"
measurement = "ImageQuality_FocusScore"
wants_minimum = true
minimum_value = 0.0
wants_maximum = true
maximum_value = 1.0

# Object-based criterion: every object must lie within the bounds
# [[flag.criterion]]
# source = "all_objects"
# object_name = "Nuclei"
# measurement = "AreaShape_Area"
# minimum_value = 50.0
# wants_maximum = false

# Rules-based criterion: flag when most rows are scored into a selected class
# [[flag.criterion]]
# source = "rules"
# rules_file_name = "rules.txt"
# rules_classes = [1]
# [flag.criterion.rules_location]
# base = "default_input_subfolder"
# path = "classifiers"
"#
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
