// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and environment) using clap
// 2. Set up logging to stderr
// 3. Run every README check
// 4. Print the report
// 5. Exit with proper code (0 = all checks passed, 1 = a check failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use tracing_subscriber::EnvFilter;

use cli::Cli;
use readme_guardian::report::print_report;
use readme_guardian::{Cancellation, Validator};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every check passed
//   Ok(1) = at least one check failed
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.run_config();
    if !cli.json {
        println!("🔍 Validating README: {}\n", config.document_path.display());
    }

    // Ctrl-C resolves every pending link check as cancelled, so the report
    // still gets printed
    let cancel = Cancellation::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling pending link checks");
            on_interrupt.cancel();
        }
    });

    let validator = Validator::with_cancellation(config, cancel)?;
    let report = validator.run().await;

    print_report(&report, cli.json)?;

    Ok(report.exit_code())
}

// Logs go to stderr so they never mix with the report (or the JSON) on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second subscriber can't be installed; nothing to do if one already is
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
