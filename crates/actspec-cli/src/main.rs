//! # actspec CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

/// actspec — action schema toolchain.
///
/// Describes action schema manifests and checks JSON action streams
/// against them.
#[derive(Parser, Debug)]
#[command(name = "actspec", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the actions declared by a manifest.
    Describe(actspec_cli::describe::DescribeArgs),
    /// Validate a stream of JSON actions against a manifest.
    Check(actspec_cli::check::CheckArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match cli.command {
        Commands::Describe(args) => {
            actspec_cli::describe::run(&args, &mut out)?;
            ExitCode::SUCCESS
        }
        Commands::Check(args) => {
            let input = actspec_cli::check::open_input(&args)?;
            let summary = actspec_cli::check::run(&args, input, &mut out)?;
            if summary.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    out.flush()?;
    Ok(code)
}
