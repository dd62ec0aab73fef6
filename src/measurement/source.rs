use crate::error::Result;

use super::MeasurementStore;

/// Where a criterion's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementScope<'a> {
    /// A single per-image value.
    Image,
    /// The mean over all objects of the named type.
    AverageOf(&'a str),
    /// Every object of the named type, without averaging.
    AllOf(&'a str),
}

impl MeasurementScope<'_> {
    /// Label shown in the "Source" column of the results table.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Image => super::IMAGE.to_string(),
            Self::AverageOf(object) => format!("Ave. {object}"),
            Self::AllOf(object) => (*object).to_string(),
        }
    }
}

/// Values fetched from the store for one scope.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValues {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl SourceValues {
    /// Fetch the values of `feature` in the given scope.
    ///
    /// # Errors
    /// Propagates `MeasurementLookup` from the store.
    pub fn fetch(
        store: &dyn MeasurementStore,
        scope: MeasurementScope<'_>,
        feature: &str,
    ) -> Result<Self> {
        match scope {
            MeasurementScope::Image => store.get_scalar(feature).map(Self::Scalar),
            MeasurementScope::AverageOf(object) | MeasurementScope::AllOf(object) => {
                store.get_vector(object, feature).map(Self::Vector)
            }
        }
    }
}
