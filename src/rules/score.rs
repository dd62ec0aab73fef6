use crate::error::{QcGuardError, Result};
use crate::measurement::MeasurementStore;

use super::{Rule, Rules};

/// Class scores: one row per scored object, one column per class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    #[must_use]
    pub const fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows with no NaN score.
    pub fn complete_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows
            .iter()
            .filter(|row| !row.iter().any(|s| s.is_nan()))
            .map(Vec::as_slice)
    }

    fn add(&mut self, other: Self) -> Result<()> {
        if self.rows.len() != other.rows.len() {
            return Err(QcGuardError::Config(format!(
                "rules score {} and {} objects; all rules must score the same objects",
                self.rows.len(),
                other.rows.len()
            )));
        }
        for (row, other_row) in self.rows.iter_mut().zip(other.rows) {
            for (score, other_score) in row.iter_mut().zip(other_row) {
                *score += other_score;
            }
        }
        Ok(())
    }
}

/// Index of the highest score in a row; ties go to the lowest class.
#[must_use]
pub fn arg_max(row: &[f64]) -> Option<usize> {
    row.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}

impl Rule {
    fn score(&self, store: &dyn MeasurementStore) -> Result<ScoreMatrix> {
        let values = store.get_vector(&self.object_name, &self.feature)?;
        let rows = values
            .into_iter()
            .map(|value| {
                if value.is_nan() {
                    vec![f64::NAN; self.class_count()]
                } else if self.comparator.holds(value, self.threshold) {
                    self.weights_if_true.clone()
                } else {
                    self.weights_if_false.clone()
                }
            })
            .collect();
        Ok(ScoreMatrix::from_rows(rows))
    }
}

impl Rules {
    /// Sum the per-rule scores over every object the rules measure.
    ///
    /// # Errors
    /// Propagates lookup failures for measurements the rules reference, and
    /// fails if rules score different numbers of objects.
    pub fn score(&self, store: &dyn MeasurementStore) -> Result<ScoreMatrix> {
        let mut total: Option<ScoreMatrix> = None;
        for rule in &self.rules {
            let partial = rule.score(store)?;
            match total.as_mut() {
                Some(sum) => sum.add(partial)?,
                None => total = Some(partial),
            }
        }
        Ok(total.unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
