// src/config.rs
// =============================================================================
// Configuration for one validation run.
//
// Everything the engine needs is passed in through RunConfig. The library
// never reads environment variables itself; the CLI layer (src/cli.rs) does
// that and hands over a finished RunConfig.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// How many link checks may be in flight at the same time.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How many lines after a section heading the first table row may appear on.
pub const DEFAULT_TABLE_WINDOW: usize = 5;

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The README to validate
    pub document_path: PathBuf,
    /// Upper bound on concurrent HTTP requests (never below 1)
    pub concurrency: usize,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Search window for the table that must follow a section heading
    pub table_window: usize,
}

impl RunConfig {
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            table_window: DEFAULT_TABLE_WINDOW,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_table_window(mut self, lines: usize) -> Self {
        self.table_window = lines;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new("README.md")
    }
}
