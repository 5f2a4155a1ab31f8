//! The read-only views offered to callers.
//!
//! A [`Dataset`] only knows where the two source files live. Every call
//! re-reads and re-parses them, so concurrent callers share nothing and a
//! file edited on disk is picked up by the next call.

use crate::core::{
    compute_active_counts, compute_graph, detect_peaks, detect_top_decile, DailyCount, Network,
};
use crate::ingest::{
    load_activities, load_adjacency, Activity, AdjacencyMatrix, DateNormalizer, LoadError,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default activities file name inside the data directory.
pub const DEFAULT_ACTIVITIES_FILE: &str = "activity-properties.csv";

/// Default adjacency file name inside the data directory.
pub const DEFAULT_ADJACENCY_FILE: &str = "adjacency-matrix.csv";

/// Daily series plus selected peaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCounts {
    pub counts: Vec<DailyCount>,
    pub peaks: Vec<DailyCount>,
}

/// Location of the source files and how to read their dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    activities_path: PathBuf,
    adjacency_path: PathBuf,
    normalizer: DateNormalizer,
}

impl Dataset {
    /// Create a dataset from explicit file paths.
    pub fn new(
        activities_path: impl Into<PathBuf>,
        adjacency_path: impl Into<PathBuf>,
        normalizer: DateNormalizer,
    ) -> Self {
        Self {
            activities_path: activities_path.into(),
            adjacency_path: adjacency_path.into(),
            normalizer,
        }
    }

    /// Default file names inside `data_dir`, dates read as UTC.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self::new(
            dir.join(DEFAULT_ACTIVITIES_FILE),
            dir.join(DEFAULT_ADJACENCY_FILE),
            DateNormalizer::default(),
        )
    }

    pub fn activities_path(&self) -> &Path {
        &self.activities_path
    }

    pub fn adjacency_path(&self) -> &Path {
        &self.adjacency_path
    }

    pub fn normalizer(&self) -> &DateNormalizer {
        &self.normalizer
    }

    /// All activities with their durations.
    pub fn activities(&self) -> Result<Vec<Activity>, LoadError> {
        load_activities(&self.activities_path, &self.normalizer)
    }

    /// The raw numeric adjacency matrix.
    pub fn adjacency(&self) -> Result<AdjacencyMatrix, LoadError> {
        load_adjacency(&self.adjacency_path)
    }

    /// Nodes with degrees plus the edge list.
    pub fn network(&self) -> Result<Network, LoadError> {
        let activities = self.activities()?;
        let matrix = self.adjacency()?;
        Ok(compute_graph(&activities, &matrix))
    }

    /// Daily series with the fixed top-10% peaks.
    pub fn active_counts(&self) -> Result<ActiveCounts, LoadError> {
        let counts = compute_active_counts(&self.activities()?);
        let peaks = detect_top_decile(&counts);
        Ok(ActiveCounts { counts, peaks })
    }

    /// Daily series with peaks chosen at `percentile` and plateaus collapsed.
    pub fn active_counts_with_percentile(
        &self,
        percentile: f64,
    ) -> Result<ActiveCounts, LoadError> {
        let counts = compute_active_counts(&self.activities()?);
        let peaks = detect_peaks(&counts, percentile);
        Ok(ActiveCounts { counts, peaks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir_uses_default_names() {
        let dataset = Dataset::from_dir("/srv/data");
        assert_eq!(
            dataset.activities_path(),
            Path::new("/srv/data/activity-properties.csv")
        );
        assert_eq!(
            dataset.adjacency_path(),
            Path::new("/srv/data/adjacency-matrix.csv")
        );
        assert_eq!(dataset.normalizer().timezone(), chrono_tz::Tz::UTC);
    }

    #[test]
    fn test_missing_files_are_read_errors() {
        let dataset = Dataset::from_dir("/definitely/not/a/data/dir");
        assert!(matches!(dataset.activities(), Err(LoadError::Read { .. })));
        assert!(matches!(dataset.adjacency(), Err(LoadError::Read { .. })));
        assert!(matches!(dataset.network(), Err(LoadError::Read { .. })));
        assert!(matches!(dataset.active_counts(), Err(LoadError::Read { .. })));
    }
}
