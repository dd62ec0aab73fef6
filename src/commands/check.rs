use crate::checker::FlagChecker;
use crate::cli::{CheckArgs, Cli};
use crate::config::RealFileSystem;
use crate::error::Result;
use crate::measurement::MeasurementsFile;
use crate::output::{
    EvaluationProgress, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, print_error,
};
use crate::rules::FileRulesProvider;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_THRESHOLD_EXCEEDED};

use super::{load_config, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates the configuration, then evaluates every image set.
///
/// # Errors
/// Returns an error if the configuration or measurements cannot be loaded,
/// a rules file is unusable, or a measurement a flag reads is missing.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    // 1. Load configuration and measurements
    let config = load_config(args.config.as_deref())?;
    let file = MeasurementsFile::load(&RealFileSystem, &args.measurements)?;
    let measured = file.measured_features();

    // 2. Validate before touching any image set
    let checker = FlagChecker::prepare(config, &FileRulesProvider::new(), Some(&measured))?;

    // 3. Evaluate image sets in parallel
    let progress = EvaluationProgress::new(file.image_sets.len() as u64, cli.quiet);
    let report = checker.run(&file, || progress.inc());
    progress.finish();
    let report = report?;

    // 4. Format and write output
    let output = match args.format {
        OutputFormat::Text => {
            TextFormatter::with_verbose(cli.color.into(), cli.verbose).format(&report)?
        }
        OutputFormat::Json => JsonFormatter.format(&report)?,
    };
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if report.has_flagged() {
        Ok(EXIT_THRESHOLD_EXCEEDED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
