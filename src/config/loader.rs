use std::path::{Path, PathBuf};

use crate::error::{QcGuardError, Result};
use crate::settings::SettingsFile;

use super::model::{CONFIG_VERSION, Config};
use super::{FileSystem, RealFileSystem};

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// Files with a `.toml` extension are parsed as typed configuration;
    /// anything else is read as a flat settings list and migrated.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or migrated.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

pub const LOCAL_CONFIG_NAME: &str = ".qc-guard.toml";
pub const USER_CONFIG_NAME: &str = "config.toml";

/// Validate config version. Returns an error if version is unsupported.
fn validate_config_version(config: &Config) -> Result<()> {
    match &config.version {
        None => Ok(()),
        Some(v) if v == CONFIG_VERSION => Ok(()),
        Some(v) => Err(QcGuardError::Config(format!(
            "Unsupported config version '{v}'. Only version '{CONFIG_VERSION}' is supported. \
             Run `qc-guard migrate` on older flat settings files."
        ))),
    }
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.qc-guard.toml` in current directory
/// 2. Platform-specific user config directory:
///    - Windows: `%APPDATA%\qc-guard\config.toml`
///    - macOS: `~/Library/Application Support/qc-guard/config.toml`
///    - Linux: `~/.config/qc-guard/config.toml` (XDG)
/// 3. Returns `Config::default()` if no config found
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate_config_version(&config)?;
        Ok(config)
    }

    fn parse_settings(content: &str) -> Result<Config> {
        let settings = SettingsFile::parse(content)?;
        if settings.version != crate::settings::CURRENT_VERSION || settings.legacy_import {
            tracing::info!(
                from = settings.version,
                legacy = settings.legacy_import,
                "migrating flat settings"
            );
        }
        Ok(Config::with_flags(settings.to_flags()?))
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.fs
            .read_to_string(path)
            .map_err(|source| QcGuardError::FileAccess {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        let candidates = [self.local_config_path(), self.user_config_path()];
        for path in candidates.into_iter().flatten() {
            if self.fs.exists(&path) {
                tracing::debug!(path = %path.display(), "using discovered config");
                return self.load_from_path(&path);
            }
        }
        tracing::debug!("no config found, using defaults");
        Ok(Config::default())
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self.read(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::parse_config(&content)
        } else {
            Self::parse_settings(&content)
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
