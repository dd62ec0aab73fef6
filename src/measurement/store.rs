use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{QcGuardError, Result};

use super::{IMAGE, MeasurementStore};

/// In-memory measurements for a single image set.
///
/// Missing values (`null` in JSON) are surfaced as `NaN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageMeasurements {
    /// Per-image features.
    #[serde(default)]
    pub image: IndexMap<String, Option<f64>>,

    /// Per-object features: object name -> feature -> one value per object.
    #[serde(default)]
    pub objects: IndexMap<String, IndexMap<String, Vec<Option<f64>>>>,
}

impl ImageMeasurements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image(mut self, feature: &str, value: f64) -> Self {
        self.put_scalar(IMAGE, feature, value);
        self
    }

    #[must_use]
    pub fn with_objects(mut self, object_name: &str, feature: &str, values: &[f64]) -> Self {
        self.objects
            .entry(object_name.to_string())
            .or_default()
            .insert(
                feature.to_string(),
                values.iter().map(|v| to_stored(*v)).collect(),
            );
        self
    }
}

fn to_stored(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

fn from_stored(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

impl MeasurementStore for ImageMeasurements {
    fn get_scalar(&self, feature: &str) -> Result<f64> {
        self.image
            .get(feature)
            .copied()
            .map(from_stored)
            .ok_or_else(|| QcGuardError::lookup(IMAGE, feature))
    }

    fn get_vector(&self, object_name: &str, feature: &str) -> Result<Vec<f64>> {
        if object_name == IMAGE {
            return self.get_scalar(feature).map(|v| vec![v]);
        }
        self.objects
            .get(object_name)
            .and_then(|features| features.get(feature))
            .map(|values| values.iter().copied().map(from_stored).collect())
            .ok_or_else(|| QcGuardError::lookup(object_name, feature))
    }

    fn put_scalar(&mut self, scope: &str, feature: &str, value: f64) {
        if scope == IMAGE {
            self.image.insert(feature.to_string(), to_stored(value));
        } else {
            self.objects
                .entry(scope.to_string())
                .or_default()
                .insert(feature.to_string(), vec![to_stored(value)]);
        }
    }

    fn image_features(&self) -> Vec<String> {
        self.image.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
