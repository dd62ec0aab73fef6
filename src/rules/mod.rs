//! Classifier rules files.
//!
//! Each line of a rules file names a per-image measurement, a comparison and
//! two weight vectors (one entry per class): the first is added to the class
//! scores when the comparison holds, the second when it does not.

mod parser;
mod provider;
mod score;

pub use parser::RulesParser;
pub use provider::{FileRulesProvider, RulesProvider};
pub use score::{ScoreMatrix, arg_max};

/// Comparison applied between a measurement and a rule threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl Comparator {
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterEqual),
            "=" | "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            _ => None,
        }
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Less => value < threshold,
            Self::LessEqual => value <= threshold,
            Self::Greater => value > threshold,
            Self::GreaterEqual => value >= threshold,
            Self::Equal => value == threshold,
            Self::NotEqual => value != threshold,
        }
    }
}

/// A single weighted rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub object_name: String,
    pub feature: String,
    pub comparator: Comparator,
    pub threshold: f64,
    /// Per-class weights applied when the comparison holds.
    pub weights_if_true: Vec<f64>,
    /// Per-class weights applied otherwise.
    pub weights_if_false: Vec<f64>,
}

impl Rule {
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.weights_if_true.len()
    }
}

/// An ordered rule set loaded from one rules file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules {
    pub rules: Vec<Rule>,
}

impl Rules {
    /// Number of classes, taken from the first rule; 0 for an empty rule set.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.rules.first().map_or(0, Rule::class_count)
    }

    /// Distinct measurement features referenced by the rules.
    #[must_use]
    pub fn features(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for rule in &self.rules {
            seen.insert(rule.feature.as_str());
        }
        seen.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
