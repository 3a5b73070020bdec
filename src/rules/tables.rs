// src/rules/tables.rs
// =============================================================================
// Sections that must open with a markdown table.
//
// For each section in TABLE_SPECS we check three things, reported separately:
//
//   heading  - the exact "## <Section>" line exists (trailing spaces allowed)
//   table    - a table starts right after it; only blank lines may come
//              between, and the first row must be within `window` lines
//   columns  - the table's header row is exactly the required column list
//
// A missing heading doesn't skip the other two. They fail on their own, which
// can repeat the same root cause, but each message stays accurate.
// =============================================================================

use crate::report::Assertion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Name of the check this section is reported under
    pub check_name: &'static str,
    /// Section title, without the "## "
    pub section: &'static str,
    /// Required header row, in order
    pub columns: &'static [&'static str],
}

pub const TABLE_SPECS: &[TableSpec] = &[
    TableSpec {
        check_name: "ResourceTableHeaders",
        section: "Resources",
        columns: &["Name", "Type"],
    },
    TableSpec {
        check_name: "InputsTableHeaders",
        section: "Inputs",
        columns: &["Name", "Description", "Type", "Required"],
    },
    TableSpec {
        check_name: "OutputsTableHeaders",
        section: "Outputs",
        columns: &["Name", "Description"],
    },
];

impl TableSpec {
    pub fn heading(&self) -> String {
        format!("## {}", self.section)
    }

    /// The header row as it would be written in markdown.
    pub fn header_row(&self) -> String {
        format!("| {} |", self.columns.join(" | "))
    }
}

/// Index of the first line that is exactly `heading`, ignoring trailing
/// whitespace.
pub fn find_heading(lines: &[&str], heading: &str) -> Option<usize> {
    lines.iter().position(|line| {
        line.strip_prefix(heading)
            .is_some_and(|rest| rest.trim_end().is_empty())
    })
}

/// The rows of the table that follows line `anchor`, if one does.
///
/// Blank lines are skipped; anything else that isn't a table row means there
/// is no adjacent table. The first row must sit within `window` lines of the
/// anchor so a table far below the heading is never picked up.
pub fn locate_table<'a>(lines: &[&'a str], anchor: usize, window: usize) -> Option<Vec<&'a str>> {
    let first_row = lines
        .iter()
        .enumerate()
        .skip(anchor + 1)
        .take(window)
        .find(|(_, line)| !line.trim().is_empty())
        .and_then(|(idx, line)| is_table_row(line).then_some(idx))?;

    Some(
        lines[first_row..]
            .iter()
            .take_while(|line| is_table_row(line))
            .copied()
            .collect(),
    )
}

pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Cell texts of a table row, trimmed. `| Name | Type |` -> ["Name", "Type"]
///
/// Anything that isn't a table row has no cells.
pub fn split_cells(row: &str) -> Vec<&str> {
    if !is_table_row(row) {
        return Vec::new();
    }
    let trimmed = row.trim();
    let inner = &trimmed[1..trimmed.len() - 1];
    inner.split('|').map(str::trim).collect()
}

/// Runs the heading, table and columns sub-checks for one section.
///
/// The table is searched for right below the exact "## <Section>" line only.
/// A near-miss heading such as "### Resources" fails the heading sub-check,
/// and the table and columns sub-checks fail with it even if a correct table
/// follows, since there is no heading to anchor the search to.
pub fn check_table(document: &str, spec: &TableSpec, window: usize) -> Vec<Assertion> {
    let heading = spec.heading();
    let lines: Vec<&str> = document.lines().collect();
    let anchor = find_heading(&lines, &heading);

    let mut assertions = Vec::with_capacity(3);

    assertions.push(match anchor {
        Some(line) => Assertion::pass(
            "heading",
            format!("README contains required header '{}' (line {})", heading, line + 1),
        ),
        None => Assertion::fail(
            "heading",
            format!("README does not contain required header '{}'", heading),
        ),
    });

    let table = anchor.and_then(|line| locate_table(&lines, line, window));

    assertions.push(match (&table, anchor) {
        (Some(rows), _) => Assertion::pass(
            "table",
            format!(
                "README contains a table immediately after '{}' ({} row(s))",
                heading,
                rows.len()
            ),
        ),
        (None, Some(_)) => Assertion::fail(
            "table",
            format!(
                "README does not contain a table immediately after '{}' (within {} line(s))",
                heading, window
            ),
        ),
        (None, None) => Assertion::fail(
            "table",
            format!(
                "README does not contain a table immediately after '{}': heading not found",
                heading
            ),
        ),
    });

    let header_cells = table
        .as_ref()
        .and_then(|rows| rows.first())
        .map(|row| split_cells(row));

    assertions.push(match header_cells {
        Some(cells) if cells == spec.columns => Assertion::pass(
            "columns",
            format!(
                "README contains the correct column names in the '{}' table: {}",
                spec.section,
                spec.header_row()
            ),
        ),
        Some(cells) => Assertion::fail(
            "columns",
            format!(
                "README does not contain the correct column names in the '{}' table: expected {}, found | {} |",
                spec.section,
                spec.header_row(),
                cells.join(" | ")
            ),
        ),
        None => Assertion::fail(
            "columns",
            format!(
                "README does not contain the correct column names in the '{}' table: no table to read, expected {}",
                spec.section,
                spec.header_row()
            ),
        ),
    });

    assertions
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: usize = 5;

    fn spec(section: &str) -> &'static TableSpec {
        TABLE_SPECS
            .iter()
            .find(|spec| spec.section == section)
            .unwrap()
    }

    fn outcomes(assertions: &[Assertion]) -> Vec<(&str, bool)> {
        assertions
            .iter()
            .map(|a| (a.label.as_str(), a.is_pass()))
            .collect()
    }

    #[test]
    fn test_minimal_resources_table_passes() {
        let document = "## Resources\n| Name | Type |\n|---|---|";
        let assertions = check_table(document, spec("Resources"), WINDOW);
        assert_eq!(
            outcomes(&assertions),
            vec![("heading", true), ("table", true), ("columns", true)]
        );
    }

    #[test]
    fn test_missing_column_fails_only_columns() {
        let document = "## Resources\n| Name |\n|---|";
        let assertions = check_table(document, spec("Resources"), WINDOW);
        assert_eq!(
            outcomes(&assertions),
            vec![("heading", true), ("table", true), ("columns", false)]
        );
    }

    #[test]
    fn test_reordered_columns_fail_only_columns() {
        let document = "## Resources\n| Type | Name |\n|---|---|";
        let assertions = check_table(document, spec("Resources"), WINDOW);
        assert_eq!(
            outcomes(&assertions),
            vec![("heading", true), ("table", true), ("columns", false)]
        );
        assert!(assertions[2].message.contains("found | Type | Name |"));
    }

    #[test]
    fn test_inputs_and_outputs_tables() {
        let document = "\
## Inputs

| Name | Description | Type | Required |
|------|-------------|------|:--------:|
| name | Bucket name | `string` | yes |

## Outputs

| Name | Description |
|------|-------------|
| arn | Bucket ARN |
";
        for section in ["Inputs", "Outputs"] {
            let assertions = check_table(document, spec(section), WINDOW);
            assert!(assertions.iter().all(Assertion::is_pass), "{section}: {assertions:?}");
        }
    }

    #[test]
    fn test_text_between_heading_and_table_fails() {
        let document = "## Outputs\nThese are the outputs:\n| Name | Description |\n|---|---|";
        let assertions = check_table(document, spec("Outputs"), WINDOW);
        assert_eq!(
            outcomes(&assertions),
            vec![("heading", true), ("table", false), ("columns", false)]
        );
    }

    #[test]
    fn test_blank_lines_before_table_are_tolerated() {
        let document = "## Outputs\n\n\n| Name | Description |\n|---|---|";
        let assertions = check_table(document, spec("Outputs"), WINDOW);
        assert!(assertions.iter().all(Assertion::is_pass));
    }

    #[test]
    fn test_table_beyond_window_is_not_adjacent() {
        let document = format!("## Outputs{}| Name | Description |\n|---|---|", "\n".repeat(10));
        let assertions = check_table(&document, spec("Outputs"), WINDOW);
        assert!(!assertions[1].is_pass());
    }

    #[test]
    fn test_table_under_a_later_section_is_not_used() {
        let document = "## Resources\n\n## Other\n| Name | Type |\n|---|---|";
        let assertions = check_table(document, spec("Resources"), WINDOW);
        assert_eq!(
            outcomes(&assertions),
            vec![("heading", true), ("table", false), ("columns", false)]
        );
    }

    #[test]
    fn test_heading_allows_trailing_whitespace_only() {
        let lines = ["## Resources  \t", "## Resources and more"];
        assert_eq!(find_heading(&lines, "## Resources"), Some(0));
        assert_eq!(find_heading(&lines[1..], "## Resources"), None);
    }

    #[test]
    fn test_empty_document_fails_all_three() {
        for spec in TABLE_SPECS {
            let assertions = check_table("", spec, WINDOW);
            assert_eq!(assertions.len(), 3);
            assert!(assertions.iter().all(|a| !a.is_pass()));
        }
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("|Name|Type|"), vec!["Name", "Type"]);
        assert_eq!(split_cells("  | Name | Type |  "), vec!["Name", "Type"]);
        assert!(!is_table_row("|"));
        assert!(!is_table_row("Name | Type"));
    }

    #[test]
    fn test_split_cells_of_non_rows_is_empty() {
        for line in ["", "x", "|", "  |  ", "Name | Type"] {
            assert!(split_cells(line).is_empty(), "{line:?}");
        }
    }

    #[test]
    fn test_level_three_heading_does_not_anchor_a_table() {
        let document = "### Resources\n| Name | Type |\n|---|---|";
        let assertions = check_table(document, spec("Resources"), WINDOW);
        assert_eq!(
            outcomes(&assertions),
            vec![("heading", false), ("table", false), ("columns", false)]
        );
    }
}
