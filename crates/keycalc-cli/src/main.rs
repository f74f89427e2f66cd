//! keycalc: keystroke-driven calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! keycalc press 5 + 3 = × 2 =      # 16
//! keycalc --format json press 6 ÷ 0 =
//! echo "9 sqrt" | keycalc repl
//! ```

use clap::Parser;
use keycalc_cli::{logging, runner, Cli, CliResult, Commands};
use std::io;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = cli.config();
    logging::init(&config);
    debug!(?config, "configuration resolved");

    let stdout = io::stdout().lock();
    match cli.command {
        Commands::Press(args) => runner::run_press(&config, &args, stdout),
        Commands::Repl(args) => {
            runner::run_repl(&config, &args, io::stdin().lock(), stdout, io::stderr())
        }
        Commands::Keys => runner::run_keys(&config, stdout),
        Commands::Config => runner::run_config(&config, stdout),
    }
}
