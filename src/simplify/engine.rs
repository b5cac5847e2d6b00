use crate::core::flow::FlowLedger;
use crate::core::person::PersonId;
use crate::graph::components::settlement_components;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Before/after summary of a simplification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifyReport {
    /// Number of people in the graph (unchanged by simplification).
    pub people: usize,
    pub edges_before: usize,
    pub edges_after: usize,
    pub gross_before: Decimal,
    pub gross_after: Decimal,
}

impl SimplifyReport {
    pub fn edges_removed(&self) -> usize {
        self.edges_before.saturating_sub(self.edges_after)
    }

    /// Gross debt eliminated by the pass.
    pub fn savings(&self) -> Decimal {
        self.gross_before - self.gross_after
    }

    /// Savings as a percentage of the gross before the pass.
    pub fn savings_percent(&self) -> f64 {
        if self.gross_before == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.savings() * Decimal::from(100) / self.gross_before;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl std::fmt::Display for SimplifyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Simplify Report ===")?;
        writeln!(f, "People:        {}", self.people)?;
        writeln!(f, "Edges:         {} -> {}", self.edges_before, self.edges_after)?;
        writeln!(f, "Gross:         {} -> {}", self.gross_before, self.gross_after)?;
        writeln!(
            f,
            "Savings:       {} ({:.1}%)",
            self.savings(),
            self.savings_percent()
        )?;
        Ok(())
    }
}

/// The debt simplification engine.
///
/// Two transformations, both preserving every person's net flow:
///
/// - **cancel** nets mutually-offsetting debt within each pair
/// - **collapse** rebuilds each settlement component from net flows,
///   down to at most one edge fewer than its member count
pub struct SimplifyEngine;

impl SimplifyEngine {
    /// Cancel useless debt in symmetric relationships.
    ///
    /// For every pair where both directions carry debt, only the
    /// difference survives, owed in the direction of the larger amount.
    /// An exactly-offsetting pair disappears entirely.
    ///
    /// Each pair is independent of every other pair, so visitation
    /// order cannot affect the result, and a second run finds no
    /// symmetric pairs left: the operation is idempotent.
    pub fn cancel(graph: &mut DebtGraph) -> SimplifyReport {
        let (edges_before, gross_before) = snapshot(graph);

        let mut pairs: Vec<(PersonId, PersonId)> = Vec::new();
        for (creditor, debtor, _) in graph.edges() {
            if creditor < debtor && graph.amount_owed(debtor, creditor) > Decimal::ZERO {
                pairs.push((creditor.clone(), debtor.clone()));
            }
        }

        for (a, b) in pairs {
            let a_to_b = graph.amount_owed(&a, &b);
            let b_to_a = graph.amount_owed(&b, &a);
            let net = a_to_b - b_to_a;
            if net > Decimal::ZERO {
                graph.set_edge(&a, &b, net);
                graph.remove_edge(&b, &a);
            } else if net < Decimal::ZERO {
                graph.set_edge(&b, &a, -net);
                graph.remove_edge(&a, &b);
            } else {
                graph.remove_edge(&a, &b);
                graph.remove_edge(&b, &a);
            }
        }

        report(graph, edges_before, gross_before)
    }

    /// Collapse the graph to a minimal edge set with the same net flows,
    /// replacing `graph` with a freshly built one.
    pub fn collapse(graph: &mut DebtGraph) -> SimplifyReport {
        let (edges_before, gross_before) = snapshot(graph);
        *graph = Self::collapsed(graph);
        report(graph, edges_before, gross_before)
    }

    /// Run [`SimplifyEngine::cancel`] then [`SimplifyEngine::collapse`].
    ///
    /// Cancellation strips cheap local redundancy first; collapse then
    /// does the global minimization from net flows. The report spans
    /// the whole pass.
    pub fn cleanup(graph: &mut DebtGraph) -> SimplifyReport {
        let (edges_before, gross_before) = snapshot(graph);
        Self::cancel(graph);
        *graph = Self::collapsed(graph);
        report(graph, edges_before, gross_before)
    }

    /// Build the collapsed form of a graph without touching the original.
    ///
    /// # Algorithm
    ///
    /// Within each settlement component (whose flows sum to zero by
    /// construction):
    ///
    /// 1. Partition members into net creditors and net debtors; people
    ///    with zero flow stay in the graph as isolated nodes.
    /// 2. Sort both sides largest-magnitude-first, ties broken by name.
    /// 3. Repeatedly settle `min(credit, debit)` between the largest
    ///    creditor and the largest debtor as a single edge, dropping
    ///    whichever side is fully settled.
    ///
    /// Each settlement retires at least one person and the final one
    /// retires two, so a component with `k` nonzero-flow members ends
    /// with at most `k - 1` edges. No edge ever crosses a component
    /// boundary. Amounts are exact decimals, so "fully settled" is an
    /// exact equality, not an epsilon test.
    pub fn collapsed(graph: &DebtGraph) -> DebtGraph {
        let ledger = FlowLedger::from_graph(graph);
        let mut result = DebtGraph::from_map(
            graph
                .people()
                .into_iter()
                .map(|person| (person.clone(), HashMap::new()))
                .collect(),
        );

        for component in settlement_components(graph) {
            let mut creditors: Vec<(PersonId, Decimal)> = Vec::new();
            let mut debtors: Vec<(PersonId, Decimal)> = Vec::new();
            for person in &component.people {
                let flow = ledger.flow(person);
                if flow > Decimal::ZERO {
                    creditors.push((person.clone(), flow));
                } else if flow < Decimal::ZERO {
                    debtors.push((person.clone(), -flow));
                }
            }
            creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            debtors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            let (mut ci, mut di) = (0, 0);
            while ci < creditors.len() && di < debtors.len() {
                let credit = creditors[ci].1;
                let debit = debtors[di].1;
                let settled = credit.min(debit);
                result.insert_edge(&creditors[ci].0, &debtors[di].0, settled);
                if credit == debit {
                    ci += 1;
                    di += 1;
                } else if credit < debit {
                    debtors[di].1 -= settled;
                    ci += 1;
                } else {
                    creditors[ci].1 -= settled;
                    di += 1;
                }
            }
            // Component flows sum to zero, so both sides run out together.
            debug_assert_eq!(ci, creditors.len());
            debug_assert_eq!(di, debtors.len());
        }

        result
    }
}

fn snapshot(graph: &DebtGraph) -> (usize, Decimal) {
    (graph.edge_count(), graph.gross_total())
}

fn report(graph: &DebtGraph, edges_before: usize, gross_before: Decimal) -> SimplifyReport {
    SimplifyReport {
        people: graph.person_count(),
        edges_before,
        edges_after: graph.edge_count(),
        gross_before,
        gross_after: graph.gross_total(),
    }
}
