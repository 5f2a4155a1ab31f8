//! Derived views over the loaded activities.
//!
//! This module contains:
//! - In/out degree and edge list from the adjacency matrix
//! - The daily active-activity series
//! - Peak-day selection over that series

pub mod graph;
pub mod peaks;
pub mod timeline;

// Re-export commonly used types
pub use graph::{compute_graph, GraphLink, GraphNode, Network};
pub use peaks::{
    detect_peaks, detect_top_decile, peak_threshold, rank_peaks, RankedPeak,
    DEFAULT_PEAK_PERCENTILE,
};
pub use timeline::{compute_active_counts, DailyCount};
