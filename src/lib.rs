//! # debtgraph
//!
//! Shared-expense debt tracking and settlement simplification engine.
//!
//! Debts between people form a directed weighted graph: an edge from
//! creditor to debtor records an outstanding amount owed. This crate
//! maintains that graph and reduces it to an equivalent minimal form.
//! "Equivalent" means every person's net position is preserved;
//! "minimal" means mutually-offsetting debts are cancelled and the
//! remaining edge set is collapsed down from each person's net flow.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: person identifiers, net-flow ledger
//! - **graph** — The debt graph, edge mutation, settlement components
//! - **simplify** — Cancellation and collapse algorithms
//! - **simulation** — Random debt-network generation for stress testing
//! - **store** — JSON persistence of the graph

pub mod core;
pub mod graph;
pub mod simplify;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::flow::FlowLedger;
    pub use crate::core::person::PersonId;
    pub use crate::graph::debt_graph::{DebtGraph, GraphError};
    pub use crate::simplify::engine::{SimplifyEngine, SimplifyReport};
}
