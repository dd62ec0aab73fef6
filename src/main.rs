use clap::Parser;
use tracing_subscriber::EnvFilter;

use qc_guard::cli::{Cli, Commands};
use qc_guard::commands::{run_check, run_classes, run_config, run_init, run_migrate};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Migrate(args) => run_migrate(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args),
        Commands::Classes(args) => run_classes(args),
    };

    std::process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise `-v` enables debug and `-vv` trace.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}
