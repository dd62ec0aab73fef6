use std::fmt::Write;

use crate::checker::{Disposition, ImageSetReport, RunReport};
use crate::error::Result;

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

const COLUMN_GAP: usize = 2;

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// Left-aligned columns sized to their widest cell.
    fn format_table(table: &[Vec<String>], output: &mut String) {
        let columns = table.first().map_or(0, Vec::len);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                table
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in table {
            let mut line = String::new();
            for (cell, width) in row.iter().zip(&widths) {
                let _ = write!(line, "{cell:<width$}", width = width + COLUMN_GAP);
            }
            let _ = writeln!(output, "{}", line.trim_end());
        }
    }

    fn format_image_set(&self, set: &ImageSetReport, output: &mut String) {
        let (icon, status, color) = if set.is_flagged() {
            ("✗", "FLAGGED", ansi::RED)
        } else {
            ("✓", "PASSED", ansi::GREEN)
        };
        let _ = writeln!(
            output,
            "{icon} {}: image set {}",
            self.colorize(status, color),
            set.image_set
        );

        for flag in &set.flags {
            let _ = writeln!(output, "   {} = {}", flag.flag_name, flag.value);
            for row in &flag.stats {
                let stats = &row.criterion;
                if self.verbose == 0 && stats.verdict.is_pass() {
                    continue;
                }
                let _ = writeln!(
                    output,
                    "     {} {}: {} ({})",
                    stats.source,
                    stats.measurement,
                    stats.value,
                    stats.verdict.label()
                );
            }
        }

        if set.disposition == Disposition::SkipRemainder {
            let _ = writeln!(
                output,
                "   {}",
                self.colorize("Remaining processing skipped", ansi::YELLOW)
            );
        }
    }

    fn format_summary(&self, report: &RunReport) -> String {
        let total = report.image_sets.len();
        let flagged = report.flagged_count();
        let passed = total - flagged;
        format!(
            "Summary: {total} image sets checked, {} passed, {} flagged",
            self.colorize(&passed.to_string(), ansi::GREEN),
            self.colorize(&flagged.to_string(), ansi::RED)
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let mut output = String::new();

        let table = report.table();
        if !table.is_empty() {
            Self::format_table(&table, &mut output);
            output.push('\n');
        }

        for set in &report.image_sets {
            if set.is_flagged() || self.verbose >= 1 {
                self.format_image_set(set, &mut output);
                output.push('\n');
            }
        }

        let _ = writeln!(output, "{}", self.format_summary(report));
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
