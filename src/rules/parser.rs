use std::path::Path;

use regex::Regex;

use crate::error::{QcGuardError, Result};

use super::{Comparator, Rule, Rules};

/// Parser for the `IF (<Object>_<Feature> <op> <threshold>, [..], [..])` rule syntax.
pub struct RulesParser {
    rule_pattern: Regex,
}

impl Default for RulesParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rule_pattern: Regex::new(
                r"^IF\s*\(\s*(?P<object>[^_\s]+)_(?P<feature>\S+?)\s*(?P<op><=|>=|==|!=|<|>|=)\s*(?P<threshold>[^,\s]+)\s*,\s*\[(?P<if_true>[^\]]*)\]\s*,\s*\[(?P<if_false>[^\]]*)\]\s*\)\s*$",
            )
            .expect("Invalid regex"),
        }
    }

    /// Parse the full text of a rules file. Blank lines are ignored.
    ///
    /// # Errors
    /// Returns `RulesParse` naming the first line that is not a valid rule.
    pub fn parse(&self, content: &str, path: &Path) -> Result<Rules> {
        let mut rules = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let rule = self.parse_line(line).map_err(|message| QcGuardError::RulesParse {
                path: path.to_path_buf(),
                line: index + 1,
                message,
            })?;
            if let Some(first) = rules.first().map(Rule::class_count)
                && first != rule.class_count()
            {
                return Err(QcGuardError::RulesParse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message: format!(
                        "rule scores {} classes but earlier rules score {first}",
                        rule.class_count()
                    ),
                });
            }
            rules.push(rule);
        }
        Ok(Rules { rules })
    }

    fn parse_line(&self, line: &str) -> std::result::Result<Rule, String> {
        let caps = self
            .rule_pattern
            .captures(line)
            .ok_or_else(|| format!("not a rule: {line}"))?;

        let op = &caps["op"];
        let comparator =
            Comparator::from_symbol(op).ok_or_else(|| format!("unknown comparison '{op}'"))?;
        let threshold = parse_number(&caps["threshold"])?;
        let weights_if_true = parse_weights(&caps["if_true"])?;
        let weights_if_false = parse_weights(&caps["if_false"])?;

        if weights_if_true.is_empty() {
            return Err("rule has no class weights".to_string());
        }
        if weights_if_true.len() != weights_if_false.len() {
            return Err(format!(
                "weight vectors differ in length ({} vs {})",
                weights_if_true.len(),
                weights_if_false.len()
            ));
        }

        Ok(Rule {
            object_name: caps["object"].to_string(),
            feature: caps["feature"].to_string(),
            comparator,
            threshold,
            weights_if_true,
            weights_if_false,
        })
    }
}

fn parse_number(text: &str) -> std::result::Result<f64, String> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| format!("'{text}' is not a number"))
}

fn parse_weights(text: &str) -> std::result::Result<Vec<f64>, String> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',').map(parse_number).collect()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
