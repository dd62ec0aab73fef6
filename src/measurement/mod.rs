//! Measurement access for flag evaluation.
//!
//! The store is the only shared state the checker touches: it reads feature
//! values for one image set and writes back one scalar per flag.

mod file;
mod source;
mod store;

pub use file::MeasurementsFile;
pub use source::{MeasurementScope, SourceValues};
pub use store::ImageMeasurements;

use crate::error::Result;

/// Object name under which per-image measurements are recorded.
pub const IMAGE: &str = "Image";

/// Key/value access to the measurements recorded for the current image set.
pub trait MeasurementStore {
    /// Fetch a per-image measurement.
    ///
    /// # Errors
    /// Returns `MeasurementLookup` if the feature has not been recorded.
    fn get_scalar(&self, feature: &str) -> Result<f64>;

    /// Fetch the per-object values of a measurement. Asking for the
    /// [`IMAGE`] object yields the scalar as a single-element vector.
    ///
    /// # Errors
    /// Returns `MeasurementLookup` if the object or feature is unknown.
    fn get_vector(&self, object_name: &str, feature: &str) -> Result<Vec<f64>>;

    /// Record a scalar measurement in the given object scope.
    fn put_scalar(&mut self, scope: &str, feature: &str, value: f64);

    /// Names of the per-image features recorded so far.
    fn image_features(&self) -> Vec<String>;
}
