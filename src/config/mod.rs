mod filesystem;
mod loader;
mod model;
mod validation;

#[cfg(test)]
mod mock_fs;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, USER_CONFIG_NAME};
pub use model::{
    CONFIG_VERSION, CombinationPolicy, Config, Criterion, DEFAULT_CATEGORY, DEFAULT_FEATURE_NAME,
    DEFAULT_RULES_FILE_NAME, Flag, LocationBase, NONE, PathsConfig, RulesLocation, SourceKind,
};
pub use validation::validate_config_semantics;

#[cfg(test)]
pub use mock_fs::MockFileSystem;
