use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::FileSystem;
use crate::error::{QcGuardError, Result};

use super::ImageMeasurements;

/// A JSON document holding the measurements of every image set in a run.
///
/// ```json
/// { "image_sets": [ { "image": { "Focus": 0.4 }, "objects": { "Nuclei": { "Area": [10, 12] } } } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurementsFile {
    #[serde(default)]
    pub image_sets: Vec<ImageMeasurements>,
}

impl MeasurementsFile {
    /// Read and parse a measurements file.
    ///
    /// # Errors
    /// Returns `FileAccess` if the file cannot be read, or a JSON error if it is malformed.
    pub fn load(fs: &impl FileSystem, path: &Path) -> Result<Self> {
        let content = fs
            .read_to_string(path)
            .map_err(|source| QcGuardError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Per-image features recorded by the first image set.
    ///
    /// These stand in for the measurement columns produced upstream of the
    /// flagging step when validating rules files.
    #[must_use]
    pub fn measured_features(&self) -> Vec<String> {
        self.image_sets
            .first()
            .map(|set| set.image.keys().cloned().collect())
            .unwrap_or_default()
    }
}
