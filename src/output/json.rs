use serde::Serialize;

use crate::checker::{Disposition, FlagStats, ImageSetReport, RunReport};
use crate::error::Result;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    results: Vec<ImageSetResult<'a>>,
}

#[derive(Serialize)]
struct Summary {
    total_image_sets: usize,
    passed: usize,
    flagged: usize,
}

#[derive(Serialize)]
struct ImageSetResult<'a> {
    image_set: usize,
    status: &'static str,
    disposition: Disposition,
    flags: Vec<FlagResult<'a>>,
}

#[derive(Serialize)]
struct FlagResult<'a> {
    name: &'a str,
    value: u8,
    criteria: &'a [FlagStats],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let flagged = report.flagged_count();
        let output = JsonOutput {
            summary: Summary {
                total_image_sets: report.image_sets.len(),
                passed: report.image_sets.len() - flagged,
                flagged,
            },
            results: report.image_sets.iter().map(convert_result).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_result(set: &ImageSetReport) -> ImageSetResult<'_> {
    ImageSetResult {
        image_set: set.image_set,
        status: if set.is_flagged() { "flagged" } else { "passed" },
        disposition: set.disposition,
        flags: set
            .flags
            .iter()
            .map(|flag| FlagResult {
                name: &flag.flag_name,
                value: flag.value,
                criteria: &flag.stats,
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
