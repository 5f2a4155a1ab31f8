//! Activity Visualizer - derived views over project activity exports.
//!
//! Two CSV files describe a project: one row per activity with start and
//! end dates, and a directed adjacency matrix between those activities.
//! This library turns them into the three views a chart front end needs:
//! per-activity durations, a dependency graph with degrees, and a daily
//! count of concurrently active activities with peak days marked.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Activity Visualizer                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌────────────────────┐    │
//! │  │ CSV Reader │──▶│ Activities │──▶│ Daily counts/peaks │    │
//! │  │  + Dates   │   │ (durations)│   └────────────────────┘    │
//! │  └────────────┘   └────────────┘             │               │
//! │        │                 │                   │               │
//! │        ▼                 ▼                   ▼               │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────────────┐    │
//! │  │ Adjacency  │──▶│   Graph    │──▶│  Dataset / server  │    │
//! │  │   matrix   │   │  degrees   │   └────────────────────┘    │
//! │  └────────────┘   └────────────┘                             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use activity_visualizer::Dataset;
//!
//! let dataset = Dataset::from_dir("data");
//! let counts = dataset.active_counts().expect("Failed to load activities");
//! for peak in &counts.peaks {
//!     println!("{}: {}", peak.date, peak.count);
//! }
//! ```

pub mod config;
pub mod core;
pub mod dataset;
pub mod ingest;

#[cfg(feature = "server")]
pub mod server;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use core::{
    compute_active_counts, compute_graph, detect_peaks, detect_top_decile, rank_peaks,
    DailyCount, GraphLink, GraphNode, Network, RankedPeak,
};
pub use dataset::{ActiveCounts, Dataset};
pub use ingest::{parse_date, Activity, AdjacencyMatrix, DateNormalizer, LoadError, RawTable};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
