//! Loading of the two source files.
//!
//! - CSV reading into a raw header + rows table
//! - Date normalisation for mixed day-first / year-first / ISO formats
//! - Activity records with computed durations
//! - The numeric adjacency matrix

pub mod activities;
pub mod adjacency;
pub mod csv_reader;
pub mod dates;
pub mod error;

// Re-export commonly used types
pub use activities::{load_activities, Activity};
pub use adjacency::{load_adjacency, AdjacencyMatrix};
pub use csv_reader::{read_table, RawTable};
pub use dates::{parse_date, DateNormalizer};
pub use error::LoadError;
