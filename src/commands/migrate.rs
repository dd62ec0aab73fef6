use crate::cli::{Cli, MigrateArgs};
use crate::config::{Config, FileSystem, RealFileSystem};
use crate::error::{QcGuardError, Result};
use crate::output::print_error;
use crate::settings::SettingsFile;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::write_output;

#[must_use]
pub fn run_migrate(args: &MigrateArgs, cli: &Cli) -> i32 {
    match run_migrate_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Migrates a flat settings file and writes the result.
///
/// # Errors
/// Returns an error if migration fails or the output cannot be written.
pub fn run_migrate_impl(args: &MigrateArgs, cli: &Cli) -> Result<()> {
    let content = migrate_settings(&RealFileSystem, args)?;
    write_output(args.output.as_deref(), &content, cli.quiet)
}

/// Migrates a flat settings file and renders the result.
///
/// The result is a TOML configuration, or the current flat layout when
/// `--flat` is given.
///
/// # Errors
/// Returns an error if the file cannot be read or its settings cannot be migrated.
pub fn migrate_settings(fs: &impl FileSystem, args: &MigrateArgs) -> Result<String> {
    let content = fs
        .read_to_string(&args.input)
        .map_err(|source| QcGuardError::FileAccess {
            path: args.input.clone(),
            source,
        })?;
    let settings = SettingsFile::parse(&content)?;
    tracing::info!(
        from = settings.version,
        legacy = settings.legacy_import,
        "migrating settings"
    );

    if args.flat {
        return Ok(settings.migrate()?.render());
    }

    let config = Config::with_flags(settings.to_flags()?);
    Ok(toml::to_string_pretty(&config)?)
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
