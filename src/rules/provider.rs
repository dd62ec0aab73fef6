use std::path::Path;

use crate::config::{FileSystem, RealFileSystem};
use crate::error::{QcGuardError, Result};

use super::{Rules, RulesParser};

/// Loads rule sets on demand.
pub trait RulesProvider {
    /// Load and parse the rules file at `path`.
    ///
    /// # Errors
    /// Returns `Validation` if the file does not exist, `FileAccess` if it
    /// cannot be read and `RulesParse` if a line is malformed.
    fn load(&self, path: &Path) -> Result<Rules>;
}

/// Reads rules files through a [`FileSystem`].
pub struct FileRulesProvider<F: FileSystem = RealFileSystem> {
    fs: F,
    parser: RulesParser,
}

impl Default for FileRulesProvider<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileRulesProvider<RealFileSystem> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem)
    }
}

impl<F: FileSystem> FileRulesProvider<F> {
    #[must_use]
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            parser: RulesParser::new(),
        }
    }
}

impl<F: FileSystem> RulesProvider for FileRulesProvider<F> {
    fn load(&self, path: &Path) -> Result<Rules> {
        if !self.fs.exists(path) {
            let setting = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
            return Err(QcGuardError::validation(
                setting,
                format!("No such rules file: {}", path.display()),
            ));
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| QcGuardError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        let rules = self.parser.parse(&content, path)?;
        tracing::debug!(path = %path.display(), rules = rules.rules.len(), "loaded rules file");
        Ok(rules)
    }
}
