// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The README path normally comes from the README_PATH environment variable,
// which is how CI jobs hand it over. Every option can also be given as a flag,
// and every tuning knob has its own environment variable and a default.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use readme_guardian::config::{
    RunConfig, DEFAULT_CONCURRENCY, DEFAULT_TABLE_WINDOW, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "readme-guardian",
    version,
    about = "Checks a module README for required sections, tables and working links",
    long_about = "readme-guardian validates a module README before it is published: \
                  required '## ' sections must exist, the Resources/Inputs/Outputs sections \
                  must open with tables with the right columns, and every link must answer. \
                  Every problem is reported in one run."
)]
pub struct Cli {
    /// Path to the README to validate
    #[arg(long = "readme", env = "README_PATH", value_name = "PATH")]
    pub readme_path: PathBuf,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Maximum number of links checked at the same time
    #[arg(long, env = "README_GUARDIAN_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, env = "README_GUARDIAN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// How many lines after a section heading its table may start
    #[arg(long, env = "README_GUARDIAN_TABLE_WINDOW", default_value_t = DEFAULT_TABLE_WINDOW)]
    pub table_window: usize,

    /// Log every passing rule to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.readme_path.clone())
            .with_concurrency(self.concurrency)
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
            .with_table_window(self.table_window)
    }
}
