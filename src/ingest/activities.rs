//! Activity records built from the activities CSV.

use crate::ingest::csv_reader::{read_table, RawTable};
use crate::ingest::dates::DateNormalizer;
use crate::ingest::error::LoadError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column holding the activity label.
pub const NODE_ID_COLUMN: &str = "NodeId";
/// Column holding the start date.
pub const START_DATE_COLUMN: &str = "StartDate";
/// Column holding the end date.
pub const END_DATE_COLUMN: &str = "EndDate";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// One row of the activities file.
///
/// `index` is the row position (0-based, header excluded) and doubles as the
/// row/column index into the adjacency matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub index: usize,
    pub name: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Rounded whole days from start to end. Negative when end precedes start.
    pub duration_days: Option<i64>,
}

impl Activity {
    /// Both endpoints parsed.
    pub fn is_dated(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Load activities from the CSV at `path`.
pub fn load_activities(
    path: &Path,
    normalizer: &DateNormalizer,
) -> Result<Vec<Activity>, LoadError> {
    let table = read_table(path)?;
    activities_from_table(&table, normalizer)
}

/// Build activities from an already-read table.
///
/// Fails only when a required column is missing, and does so before any row
/// is looked at. Bad dates become `None`.
pub fn activities_from_table(
    table: &RawTable,
    normalizer: &DateNormalizer,
) -> Result<Vec<Activity>, LoadError> {
    let columns = [NODE_ID_COLUMN, START_DATE_COLUMN, END_DATE_COLUMN].map(|c| table.column(c));
    let [Some(name_col), Some(start_col), Some(end_col)] = columns else {
        let missing = [NODE_ID_COLUMN, START_DATE_COLUMN, END_DATE_COLUMN]
            .iter()
            .zip(columns)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        return Err(LoadError::Schema { missing });
    };

    let activities: Vec<Activity> = (0..table.rows.len())
        .map(|index| {
            let name = table
                .cell(index, name_col)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Activity {index}"));
            let start = table
                .cell(index, start_col)
                .and_then(|s| normalizer.parse(s));
            let end = table.cell(index, end_col).and_then(|s| normalizer.parse(s));

            Activity {
                index,
                name,
                start,
                end,
                duration_days: duration_days(start, end),
            }
        })
        .collect();

    let undated = activities.iter().filter(|a| !a.is_dated()).count();
    if undated > 0 {
        tracing::warn!(
            undated,
            total = activities.len(),
            "Some activities have missing or unparsable dates"
        );
    }
    tracing::debug!(count = activities.len(), "Loaded activities");

    Ok(activities)
}

/// Whole days between two instants, rounded half up.
pub fn duration_days(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<i64> {
    let millis = (end? - start?).num_milliseconds() as f64;
    Some((millis / MILLIS_PER_DAY + 0.5).floor() as i64)
}
