pub mod check;
pub mod classes;
pub mod config;
pub mod init;
pub mod migrate;

pub use check::{run_check, run_check_impl};
pub use classes::{format_class_choices, run_classes, run_classes_impl};
pub use config::{format_config_text, run_config, run_config_show_impl, run_config_validate_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use migrate::{migrate_settings, run_migrate, run_migrate_impl};

use std::path::Path;

use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::Result;

/// Load the configuration from an explicit path or by discovery.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    let loader = FileConfigLoader::new();
    match path {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

/// Write command output to a file, or to stdout unless quiet.
pub(crate) fn write_output(path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}
