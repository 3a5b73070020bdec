// src/report.rs
// =============================================================================
// Results of a validation run, and how they are printed.
//
// The shape is deliberately flat:
//   Report -> CheckResult (one per named check) -> Assertion (one per rule)
//
// A check never stops at its first failure. Every assertion is recorded, so
// one run shows the author everything that needs fixing.
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
}

/// One evaluated rule: a header, a table sub-check, a URL, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    /// What was checked (the URL, the header text, "columns", ...)
    pub label: String,
    pub outcome: Outcome,
    pub message: String,
}

impl Assertion {
    pub fn pass(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: Outcome::Pass,
            message: message.into(),
        }
    }

    pub fn fail(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: Outcome::Fail,
            message: message.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// All assertions of one named check, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub assertions: Vec<Assertion>,
}

impl CheckResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: Vec::new(),
        }
    }

    /// Records an assertion and logs it. Passing assertions go to `info`,
    /// failing ones to `warn`.
    pub fn record(&mut self, assertion: Assertion) {
        if assertion.is_pass() {
            tracing::info!(check = %self.name, label = %assertion.label, "{}", assertion.message);
        } else {
            tracing::warn!(check = %self.name, label = %assertion.label, "{}", assertion.message);
        }
        self.assertions.push(assertion);
    }

    pub fn extend(&mut self, assertions: impl IntoIterator<Item = Assertion>) {
        for assertion in assertions {
            self.record(assertion);
        }
    }

    pub fn passed(&self) -> bool {
        self.assertions.iter().all(Assertion::is_pass)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter().filter(|a| !a.is_pass())
    }

    /// Looks up an assertion by label.
    pub fn assertion(&self, label: &str) -> Option<&Assertion> {
        self.assertions.iter().find(|a| a.label == label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub checks: Vec<CheckResult>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn failure_count(&self) -> usize {
        self.checks.iter().map(|c| c.failures().count()).sum()
    }

    pub fn assertion_count(&self) -> usize {
        self.checks.iter().map(|c| c.assertions.len()).sum()
    }

    /// 0 = everything passed, 1 = at least one check failed
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    failures: usize,
    checks: &'a [CheckResult],
}

// Prints the report either as a table or JSON
pub fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        let output = JsonReport {
            passed: report.passed(),
            failures: report.failure_count(),
            checks: &report.checks,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &Report) {
    for check in &report.checks {
        let verdict = if check.passed() { "✅ PASS" } else { "❌ FAIL" };
        println!("{} {}", verdict, check.name);

        for assertion in &check.assertions {
            let mark = if assertion.is_pass() { "ok  " } else { "FAIL" };
            println!("    {} {:<45} {}", mark, truncate(&assertion.label, 45), assertion.message);
        }
        println!();
    }

    let failed_checks = report.checks.iter().filter(|c| !c.passed()).count();

    println!("📊 Summary:");
    println!("   ✅ Checks passed: {}", report.checks.len() - failed_checks);
    println!("   ❌ Checks failed: {}", failed_checks);
    println!(
        "   📋 Assertions: {} ({} failed)",
        report.assertion_count(),
        report.failure_count()
    );
}

// Truncate long labels (mostly URLs) for display
fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() > width {
        let kept: String = label.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        label.to_string()
    }
}
