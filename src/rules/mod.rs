// src/rules/mod.rs
// =============================================================================
// The structural contract every README must meet.
//
// Submodules:
// - headers: required level-2 headings and how many times each must appear
// - tables: sections that must open with a table with exact column names
//
// Both rule sets are plain data (REQUIRED_HEADERS, TABLE_SPECS), so adding a
// section means adding a row, not touching the checking code.
// =============================================================================

mod headers;
mod tables;

pub use headers::{check_headers, count_header, RequiredHeader, REQUIRED_HEADERS};
pub use tables::{
    check_table, find_heading, is_table_row, locate_table, split_cells, TableSpec, TABLE_SPECS,
};
