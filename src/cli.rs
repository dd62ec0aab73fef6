use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Output format for `config show`
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "qc-guard")]
#[command(author, version, about = "Image quality-control guard - flag image sets that fail measurement criteria")]
#[command(long_about = "Evaluates quality-control flags over per-image and per-object measurements.\n\n\
    Exit codes:\n  \
    0 - No image set was flagged\n  \
    1 - At least one image set was flagged\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every image set of a measurements file
    Check(CheckArgs),

    /// Upgrade a flat settings file to the current schema
    Migrate(MigrateArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),

    /// List the class choices of every rules criterion
    Classes(ClassesArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Measurements file (JSON) holding the image sets to evaluate
    #[arg(short, long)]
    pub measurements: PathBuf,

    /// Path to configuration file (TOML or flat settings)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Flat settings file to migrate
    pub input: PathBuf,

    /// Write the migrated settings to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the current flat layout instead of TOML
    #[arg(long)]
    pub flat: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".qc-guard.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate a configuration file and the rules files it names
    Validate {
        /// Path to configuration file (default: .qc-guard.toml)
        #[arg(short, long, default_value = ".qc-guard.toml")]
        config: PathBuf,

        /// Measurements file whose image columns the rules may read
        #[arg(short, long)]
        measurements: Option<PathBuf>,
    },

    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ConfigOutputFormat,
    },
}

#[derive(Parser, Debug)]
pub struct ClassesArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
