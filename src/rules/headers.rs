// src/rules/headers.rs
// =============================================================================
// Required section headers.
//
// Every README must contain each of these level-2 headings at least once.
// A heading counts when a line starts with the exact text (case-sensitive),
// the same way a `(?m)^## Goals` search would count it.
// =============================================================================

use crate::report::Assertion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredHeader {
    pub text: &'static str,
    pub min_count: usize,
}

const fn required(text: &'static str) -> RequiredHeader {
    RequiredHeader { text, min_count: 1 }
}

/// Checked and reported in this order.
pub const REQUIRED_HEADERS: &[RequiredHeader] = &[
    required("## Goals"),
    required("## Resources"),
    required("## Inputs"),
    required("## Outputs"),
    required("## Features"),
    required("## Testing"),
    required("## Authors"),
    required("## License"),
    required("## Usage"),
];

/// Number of lines that start with `header`.
pub fn count_header(document: &str, header: &str) -> usize {
    document.lines().filter(|line| line.starts_with(header)).count()
}

/// One assertion per required header; a missing header never hides another.
pub fn check_headers(document: &str, headers: &[RequiredHeader]) -> Vec<Assertion> {
    headers
        .iter()
        .map(|header| {
            let found = count_header(document, header.text);
            if found >= header.min_count {
                Assertion::pass(
                    header.text,
                    format!(
                        "README contains required header '{}' {} time(s) (at least {} required)",
                        header.text, found, header.min_count
                    ),
                )
            } else {
                Assertion::fail(
                    header.text,
                    format!(
                        "README does not contain required header '{}' at least {} time(s) (found {})",
                        header.text, header.min_count, found
                    ),
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = "# module\n\n## Goals\n\n## Resources\n\n## Inputs\n\n## Outputs\n\n## Features\n\n## Testing\n\n## Authors\n\n## License\n\n## Usage\n";

    fn failed_labels(assertions: &[Assertion]) -> Vec<&str> {
        assertions
            .iter()
            .filter(|a| !a.is_pass())
            .map(|a| a.label.as_str())
            .collect()
    }

    #[test]
    fn test_complete_document_passes() {
        let assertions = check_headers(COMPLETE, REQUIRED_HEADERS);
        assert_eq!(assertions.len(), REQUIRED_HEADERS.len());
        assert!(assertions.iter().all(Assertion::is_pass));
    }

    #[test]
    fn test_names_exactly_the_missing_headers() {
        let document = COMPLETE.replace("## Testing\n", "").replace("## Usage\n", "");
        let assertions = check_headers(&document, REQUIRED_HEADERS);
        assert_eq!(failed_labels(&assertions), vec!["## Testing", "## Usage"]);
    }

    #[test]
    fn test_empty_document_misses_everything() {
        let assertions = check_headers("", REQUIRED_HEADERS);
        assert_eq!(failed_labels(&assertions).len(), 9);
    }

    #[test]
    fn test_header_must_start_the_line() {
        assert_eq!(count_header("see ## Goals below", "## Goals"), 0);
        assert_eq!(count_header("  ## Goals", "## Goals"), 0);
        assert_eq!(count_header("## Goals\r\nx\n## Goals", "## Goals"), 2);
    }

    #[test]
    fn test_header_is_case_sensitive() {
        assert_eq!(count_header("## goals\n## GOALS", "## Goals"), 0);
    }

    #[test]
    fn test_level_three_heading_does_not_count() {
        assert_eq!(count_header("### Goals", "## Goals"), 0);
    }

    #[test]
    fn test_minimum_count_is_respected() {
        let twice = [RequiredHeader {
            text: "## Examples",
            min_count: 2,
        }];
        assert!(!check_headers("## Examples\n", &twice)[0].is_pass());
        assert!(check_headers("## Examples\n\n## Examples extra\n", &twice)[0].is_pass());
    }
}
