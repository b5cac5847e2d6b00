//! JSON persistence for the debt graph.
//!
//! The graph serializes transparently as its `creditor → {debtor → amount}`
//! mapping, with amounts as arbitrary-precision JSON numbers so the file
//! round-trips exactly.

use crate::graph::debt_graph::DebtGraph;
use log::debug;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors arising from loading or saving a graph file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed graph file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a graph from a JSON file.
///
/// The file contents are trusted to satisfy the graph invariants,
/// as anything written by [`save`] does.
pub fn load(path: impl AsRef<Path>) -> Result<DebtGraph, StoreError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let graph: DebtGraph = serde_json::from_str(&content)?;
    debug!(
        "loaded graph from {}: {} people, {} edges",
        path.display(),
        graph.person_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Save a graph to a JSON file, overwriting any existing contents.
pub fn save(path: impl AsRef<Path>, graph: &DebtGraph) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(graph)?;
    fs::write(path, json)?;
    debug!(
        "saved graph to {}: {} people, {} edges",
        path.display(),
        graph.person_count(),
        graph.edge_count()
    );
    Ok(())
}
