// src/lib.rs
// =============================================================================
// readme-guardian: checks that a module README meets its publishing contract.
//
// Modules:
// - checker: finds links in the README and verifies each one over HTTP
// - rules: required headings and required tables (plain data + checks)
// - runner: runs every check concurrently and builds the report
// - report: the report types and how they are printed
// - config / cancel / error: run configuration, cancellation, typed errors
//
// Typical use:
//
//   let report = Validator::new(RunConfig::new("README.md"))?.run().await;
//   std::process::exit(report.exit_code());
// =============================================================================

pub mod cancel;
pub mod checker;
pub mod config;
pub mod error;
pub mod report;
pub mod rules;
pub mod runner;

pub use cancel::Cancellation;
pub use config::RunConfig;
pub use error::{SetupError, VerifyError};
pub use report::{Assertion, CheckResult, Outcome, Report};
pub use runner::{load_document, Validator};
