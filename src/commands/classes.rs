use std::fmt::Write;

use crate::cli::ClassesArgs;
use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::output::print_error;
use crate::rules::{FileRulesProvider, RulesProvider};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::load_config;

#[must_use]
pub fn run_classes(args: &ClassesArgs) -> i32 {
    match run_classes_impl(args) {
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

/// Lists the class choices of every rules criterion in the configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded.
pub fn run_classes_impl(args: &ClassesArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    Ok(format_class_choices(&config, &FileRulesProvider::new()))
}

/// One line per rules criterion: the flag, the rules file and its classes,
/// with the selected ones marked.
///
/// Unreadable rules files fall back to the default choices.
#[must_use]
pub fn format_class_choices(config: &Config, provider: &dyn RulesProvider) -> String {
    let mut output = String::new();

    for flag in &config.flags {
        for criterion in flag
            .criteria
            .iter()
            .filter(|c| c.source == SourceKind::Rules)
        {
            let choices: Vec<String> = criterion
                .class_choices(&config.paths, provider)
                .into_iter()
                .enumerate()
                .map(|(i, choice)| {
                    if criterion.rules_classes.contains(&(i + 1)) {
                        format!("[{choice}]")
                    } else {
                        choice
                    }
                })
                .collect();
            let _ = writeln!(
                output,
                "{}: {} -> {}",
                flag.measurement_name(),
                criterion.rules_path(&config.paths).display(),
                choices.join(" ")
            );
        }
    }

    if output.is_empty() {
        output.push_str("No rules criteria configured\n");
    }
    output
}

#[cfg(test)]
#[path = "classes_tests.rs"]
mod tests;
