//! Adjacency matrix loading.

use crate::ingest::csv_reader::{read_table, RawTable};
use crate::ingest::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directed edge weights: `rows[i][j]` non-zero means an edge from activity
/// `i` to activity `j`.
///
/// Nothing guarantees the grid is square or matches the activity count, so
/// every access goes through [`AdjacencyMatrix::get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Cell value, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row)?.get(col).copied()
    }

    /// True when the cell exists and is non-zero.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_some_and(|v| v != 0.0)
    }
}

/// Load the matrix CSV at `path`. The first line is skipped as a header.
pub fn load_adjacency(path: &Path) -> Result<AdjacencyMatrix, LoadError> {
    let table = read_table(path)?;
    Ok(adjacency_from_table(&table))
}

/// Convert table rows into numbers. Never fails.
///
/// Blank lines never reach here; a row of empty cells such as `,,` is kept
/// as zeros so row `i` stays aligned with activity `i`.
pub fn adjacency_from_table(table: &RawTable) -> AdjacencyMatrix {
    let mut degraded = 0usize;
    let rows: Vec<Vec<f64>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let (value, ok) = parse_cell(cell);
                    if !ok {
                        degraded += 1;
                    }
                    value
                })
                .collect()
        })
        .collect();

    if degraded > 0 {
        tracing::warn!(degraded, "Non-numeric adjacency cells treated as 0");
    }
    tracing::debug!(rows = rows.len(), "Loaded adjacency matrix");

    AdjacencyMatrix::new(rows)
}

/// Empty cells are 0 and count as well-formed; anything unparsable (or NaN)
/// is 0 and reported as degraded.
fn parse_cell(cell: &str) -> (f64, bool) {
    if cell.is_empty() {
        return (0.0, true);
    }
    match cell.parse::<f64>() {
        Ok(v) if !v.is_nan() => (v, true),
        _ => (0.0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::csv_reader::parse_table;

    fn matrix(content: &str) -> AdjacencyMatrix {
        adjacency_from_table(&parse_table(content).unwrap())
    }

    #[test]
    fn test_header_skipped_and_cells_parsed() {
        let m = matrix(",A,B\n0,1\n1,0.5\n");
        assert_eq!(m.rows(), &[vec![0.0, 1.0], vec![1.0, 0.5]]);
    }

    #[test]
    fn test_non_numeric_and_empty_cells_are_zero() {
        let m = matrix("h\n1,x,,NaN,2\n");
        assert_eq!(m.rows()[0], vec![1.0, 0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let m = matrix("h\n1,0\n\n   \n0,1\n");
        assert_eq!(m.rows(), &[vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_all_empty_row_kept_as_zeros() {
        let m = matrix(",A,B,C\n0,0,1\n,,\n1,0,0\n");
        assert_eq!(m.len(), 3);
        assert_eq!(m.rows()[1], vec![0.0, 0.0, 0.0]);
        assert!(m.has_edge(2, 0));
        assert!(!m.has_edge(1, 0));
    }

    #[test]
    fn test_ragged_rows_and_bounds() {
        let m = matrix("h\n0,1,1\n1\n");
        assert_eq!(m.get(1, 0), Some(1.0));
        assert_eq!(m.get(1, 2), None);
        assert_eq!(m.get(5, 0), None);
        assert!(m.has_edge(0, 2));
        assert!(!m.has_edge(1, 1));
    }

    #[test]
    fn test_serialises_as_nested_arrays() {
        let m = AdjacencyMatrix::new(vec![vec![0.0, 1.0]]);
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[0.0,1.0]]");
    }
}
