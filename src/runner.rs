// src/runner.rs
// =============================================================================
// Runs every check against one README and collects the report.
//
// The six checks:
//   URLs                  every link in the document answers
//   Headers               all required level-2 headings are present
//   NotEmpty              the file is readable and has content
//   ResourceTableHeaders  } a table with the right columns follows
//   InputsTableHeaders    } the section heading
//   OutputsTableHeaders   }
//
// They run concurrently and only share read access to the document. A check
// that fails never stops another one; if the README can't be read, each
// check reports that on its own instead of the whole run aborting.
// =============================================================================

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;

use crate::cancel::Cancellation;
use crate::checker::{extract_links, LinkChecker};
use crate::config::RunConfig;
use crate::error::SetupError;
use crate::report::{Assertion, CheckResult, Report};
use crate::rules::{check_headers, check_table, TableSpec, REQUIRED_HEADERS, TABLE_SPECS};

pub const URLS_CHECK: &str = "URLs";
pub const HEADERS_CHECK: &str = "Headers";
pub const NOT_EMPTY_CHECK: &str = "NotEmpty";

/// Reads the README once. The text is shared by every check.
pub async fn load_document(path: &Path) -> Result<Arc<str>, SetupError> {
    tokio::fs::read_to_string(path)
        .await
        .map(Arc::from)
        .map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })
}

pub struct Validator {
    config: RunConfig,
    links: LinkChecker,
}

impl Validator {
    pub fn new(config: RunConfig) -> Result<Self> {
        Self::with_cancellation(config, Cancellation::new())
    }

    /// Like `new`, but link checks stop as soon as `cancel` fires.
    pub fn with_cancellation(config: RunConfig, cancel: Cancellation) -> Result<Self> {
        let links = LinkChecker::new(&config, cancel)?;
        Ok(Self { config, links })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Loads the configured README and runs every check against it.
    pub async fn run(&self) -> Report {
        let path = &self.config.document_path;
        tracing::debug!(path = %path.display(), "loading README");

        let document = load_document(path).await;
        if let Err(e) = &document {
            tracing::error!("{}", e);
        }

        let source = path.display().to_string();
        self.evaluate(document.as_deref(), &source).await
    }

    /// Runs every check against a document that is already in memory.
    pub async fn run_document(&self, document: &str) -> Report {
        self.evaluate(Ok(document), "in-memory document").await
    }

    async fn evaluate(&self, document: Result<&str, &SetupError>, source: &str) -> Report {
        let window = self.config.table_window;

        let (urls, headers, not_empty, tables) = tokio::join!(
            self.check_urls(document),
            async { check_required_headers(document) },
            async { check_not_empty(document, source) },
            join_all(
                TABLE_SPECS
                    .iter()
                    .map(|spec| async move { check_section_table(document, spec, window) })
            ),
        );

        let mut checks = vec![urls, headers, not_empty];
        checks.extend(tables);
        Report { checks }
    }

    async fn check_urls(&self, document: Result<&str, &SetupError>) -> CheckResult {
        let document = match document {
            Ok(text) => text,
            Err(e) => return setup_failed(URLS_CHECK, e),
        };

        let mut check = CheckResult::new(URLS_CHECK);
        let urls = extract_links(document);
        tracing::debug!(count = urls.len(), "verifying links");

        if urls.is_empty() {
            check.record(Assertion::pass("links", "README contains no links to verify"));
            return check;
        }

        for result in self.links.check_links(urls).await {
            let assertion = if result.is_ok() {
                Assertion::pass(
                    result.url.clone(),
                    format!("Success: URL: {}, {}", result.url, result.message),
                )
            } else {
                Assertion::fail(
                    result.url.clone(),
                    format!("Failed: URL: {}, {}", result.url, result.message),
                )
            };
            check.record(assertion);
        }

        check
    }
}

fn setup_failed(name: &str, error: &SetupError) -> CheckResult {
    let mut check = CheckResult::new(name);
    check.record(Assertion::fail("setup", format!("Failed to load README: {}", error)));
    check
}

fn check_required_headers(document: Result<&str, &SetupError>) -> CheckResult {
    let document = match document {
        Ok(text) => text,
        Err(e) => return setup_failed(HEADERS_CHECK, e),
    };

    let mut check = CheckResult::new(HEADERS_CHECK);
    check.extend(check_headers(document, REQUIRED_HEADERS));
    check
}

fn check_not_empty(document: Result<&str, &SetupError>, source: &str) -> CheckResult {
    let document = match document {
        Ok(text) => text,
        Err(e) => return setup_failed(NOT_EMPTY_CHECK, e),
    };

    let mut check = CheckResult::new(NOT_EMPTY_CHECK);
    check.record(Assertion::pass("readable", format!("README is readable: {}", source)));

    if document.is_empty() {
        check.record(Assertion::fail("content", "README is empty"));
    } else {
        check.record(Assertion::pass(
            "content",
            format!("README is not empty ({} bytes)", document.len()),
        ));
    }
    check
}

fn check_section_table(
    document: Result<&str, &SetupError>,
    spec: &TableSpec,
    window: usize,
) -> CheckResult {
    let document = match document {
        Ok(text) => text,
        Err(e) => return setup_failed(spec.check_name, e),
    };

    let mut check = CheckResult::new(spec.check_name);
    check.extend(check_table(document, spec, window));
    check
}
