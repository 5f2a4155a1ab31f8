//! Plain comma-split CSV reading.
//!
//! Quoting is switched off: every comma is a field separator, so fields that
//! contain commas are not supported. Rows may have differing lengths.

use crate::ingest::error::LoadError;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A header row plus raw string rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a header cell with exactly this name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Cell at (row, col), or `None` when the row is too short.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Read and split the file at `path`.
pub fn read_table(path: &Path) -> Result<RawTable, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::read(path, e))?;
    parse_table(&content).map_err(|e| LoadError::read(path, e))
}

/// Split already-loaded text. The first non-blank line is the header.
pub fn parse_table(content: &str) -> Result<RawTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.trim_end().as_bytes());

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Whitespace-only lines come through as a single empty field.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        lines.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut lines = lines.into_iter();
    Ok(RawTable {
        header: lines.next().unwrap_or_default(),
        rows: lines.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows_are_trimmed() {
        let table = parse_table(" NodeId , StartDate \n a , 2024-01-01\n").unwrap();
        assert_eq!(table.header, vec!["NodeId", "StartDate"]);
        assert_eq!(table.rows, vec![vec!["a", "2024-01-01"]]);
    }

    #[test]
    fn test_mixed_line_endings_and_blank_lines() {
        let table = parse_table("h1,h2\r\n1,2\r\n\r\n3,4\n\n   \n5,6\n").unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2], vec!["5", "6"]);
    }

    #[test]
    fn test_short_rows_are_kept() {
        let table = parse_table("a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1"]);
        assert_eq!(table.rows[1].len(), 4);
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(1, 3), Some("4"));
    }

    #[test]
    fn test_quotes_are_not_special() {
        let table = parse_table("name\n\"x,y\"\n").unwrap();
        assert_eq!(table.rows[0], vec!["\"x", "y\""]);
    }

    #[test]
    fn test_empty_content() {
        let table = parse_table("").unwrap();
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = read_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
