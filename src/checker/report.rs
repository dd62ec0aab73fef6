use serde::Serialize;

use super::{Disposition, FlagOutcome, FlagStats};

/// Flag outcomes for one image set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSetReport {
    /// 1-based position of the image set in the run.
    pub image_set: usize,
    pub disposition: Disposition,
    pub flags: Vec<FlagOutcome>,
}

impl ImageSetReport {
    /// Whether every criterion row of every flag passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.stats().all(|row| row.criterion.verdict.is_pass())
    }

    /// Whether any flag recorded a non-zero value.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.flags.iter().any(|flag| !flag.ok)
    }

    pub fn stats(&self) -> impl Iterator<Item = &FlagStats> {
        self.flags.iter().flat_map(|flag| &flag.stats)
    }
}

/// Results of evaluating every image set in a measurements file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub image_sets: Vec<ImageSetReport>,
}

impl RunReport {
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.image_sets.iter().filter(|set| set.is_flagged()).count()
    }

    #[must_use]
    pub fn has_flagged(&self) -> bool {
        self.flagged_count() > 0
    }

    /// Results table: a header row, then one row per image set holding each
    /// criterion's display value and an overall `Pass`/`Fail`.
    ///
    /// Columns are named after the first image set's criterion rows; an
    /// empty run yields an empty table.
    #[must_use]
    pub fn table(&self) -> Vec<Vec<String>> {
        let Some(first) = self.image_sets.first() else {
            return Vec::new();
        };
        let mut header = vec!["Image set".to_string()];
        header.extend(first.stats().map(|row| row.flag_name.clone()));
        header.push("Pass/Fail".to_string());

        let mut table = vec![header];
        for set in &self.image_sets {
            let mut row = vec![set.image_set.to_string()];
            row.extend(set.stats().map(|stats| stats.criterion.value.clone()));
            let verdict = if set.passed() { "Pass" } else { "Fail" };
            row.push(verdict.to_string());
            table.push(row);
        }
        table
    }
}
