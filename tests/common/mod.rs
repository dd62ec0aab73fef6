#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the qc-guard binary.
#[macro_export]
macro_rules! qc_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("qc-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the discovered `.qc-guard.toml` config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".qc-guard.toml", content);
    }

    /// Creates a measurements file with one image set per `(focus, areas)` pair.
    pub fn create_measurements(&self, relative_path: &str, image_sets: &[(f64, &[f64])]) {
        let sets: Vec<serde_json::Value> = image_sets
            .iter()
            .map(|(focus, areas)| {
                serde_json::json!({
                    "image": { "ImageQuality_FocusScore": focus },
                    "objects": { "Nuclei": { "AreaShape_Area": areas } }
                })
            })
            .collect();
        let content = serde_json::json!({ "image_sets": sets }).to_string();
        self.create_file(relative_path, &content);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// One flag on focus (image) and nucleus area (all objects).
pub const BASIC_CONFIG: &str = r#"
version = "4"

[[flag]]
category = "QC"
feature_name = "Focus"

[[flag.criterion]]
source = "image"
measurement = "ImageQuality_FocusScore"
minimum_value = 0.3
maximum_value = 1.0

[[flag.criterion]]
source = "all_objects"
object_name = "Nuclei"
measurement = "AreaShape_Area"
minimum_value = 10.0
maximum_value = 100.0
"#;

/// A flag that skips the remaining processing when it fails.
pub const SKIP_CONFIG: &str = r#"
version = "4"

[[flag]]
category = "QC"
feature_name = "Blurry"
skip_on_fail = true

[[flag.criterion]]
measurement = "ImageQuality_FocusScore"
minimum_value = 0.3
"#;

/// A flag scored by the classifier in `rules.txt`.
pub const RULES_CONFIG: &str = r#"
version = "4"

[[flag]]
category = "QC"
feature_name = "Classifier"

[[flag.criterion]]
source = "rules"
rules_file_name = "rules.txt"
rules_classes = [1]
"#;

/// A version-2 flat settings file: one flag, one whole-image measurement.
pub const FLAT_SETTINGS_V2: &str = "version = 2
---
1
1
QC
Focus
Flag if any fail
No
Whole-image measurement
None
ImageQuality_FocusScore
Yes
0.3
Yes
1
";
