//! Dependency graph derived from activities and the adjacency matrix.

use crate::ingest::{Activity, AdjacencyMatrix};
use serde::{Deserialize, Serialize};

/// One activity in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Activity index as a string.
    pub id: String,
    pub name: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub total_degree: usize,
    /// `max(total_degree, 1)`, so isolated nodes still get drawn.
    pub value: usize,
}

/// A directed edge between two activity indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Nodes plus links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Compute per-activity degrees and the edge list.
///
/// Degrees scan `0..matrix.len()` for every activity that has a matrix row,
/// so matrix indices with no matching activity still count towards the
/// degrees of activities that do exist. Links are only emitted for rows
/// `0..min(activities, matrix rows)`, but over the full length of each row.
/// The two bounds differ and are kept that way for compatibility with
/// existing consumers.
pub fn compute_graph(activities: &[Activity], matrix: &AdjacencyMatrix) -> Network {
    let size = matrix.len();

    let nodes = activities
        .iter()
        .enumerate()
        .map(|(i, activity)| {
            let (in_degree, out_degree) = if i < size {
                (
                    (0..size).filter(|&j| matrix.has_edge(j, i)).count(),
                    (0..size).filter(|&j| matrix.has_edge(i, j)).count(),
                )
            } else {
                (0, 0)
            };
            let total_degree = in_degree + out_degree;

            GraphNode {
                id: activity.index.to_string(),
                name: activity.name.clone(),
                in_degree,
                out_degree,
                total_degree,
                value: total_degree.max(1),
            }
        })
        .collect();

    let links = matrix
        .rows()
        .iter()
        .take(activities.len().min(size))
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, weight)| **weight != 0.0)
                .map(move |(j, _)| GraphLink {
                    source: i.to_string(),
                    target: j.to_string(),
                })
        })
        .collect();

    Network { nodes, links }
}
