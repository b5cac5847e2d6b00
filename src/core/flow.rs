use crate::core::person::PersonId;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The net monetary flow of each person in a debt graph.
///
/// A positive flow means the person is owed money overall (net creditor).
/// A negative flow means the person owes money overall (net debtor).
///
/// This is a derived projection, recomputed from the graph whenever the
/// simplification algorithms need it. It is never persisted as graph state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowLedger {
    /// PersonId -> net flow. Positive = net creditor, negative = net debtor.
    flows: HashMap<PersonId, Decimal>,
}

impl FlowLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the net flow of every person in the graph.
    ///
    /// Every node appears in the result, including people with no debts
    /// in either direction (their flow is zero).
    pub fn from_graph(graph: &DebtGraph) -> Self {
        let mut ledger = Self::new();
        for person in graph.people() {
            ledger.flows.entry(person.clone()).or_insert(Decimal::ZERO);
        }
        for (creditor, debtor, amount) in graph.edges() {
            ledger.apply_debt(creditor, debtor, amount);
        }
        ledger
    }

    /// Apply a single debt: the creditor is owed, the debtor owes.
    pub fn apply_debt(&mut self, creditor: &PersonId, debtor: &PersonId, amount: Decimal) {
        *self.flows.entry(creditor.clone()).or_insert(Decimal::ZERO) += amount;
        *self.flows.entry(debtor.clone()).or_insert(Decimal::ZERO) -= amount;
    }

    /// Net flow of one person. Zero for anyone unknown to the ledger.
    pub fn flow(&self, person: &PersonId) -> Decimal {
        self.flows.get(person).copied().unwrap_or(Decimal::ZERO)
    }

    /// All flows, including zero entries.
    pub fn all_flows(&self) -> &HashMap<PersonId, Decimal> {
        &self.flows
    }

    /// Net creditors, sorted by descending flow (largest owed first).
    /// Ties break by name so the ordering is deterministic.
    pub fn creditors(&self) -> Vec<(PersonId, Decimal)> {
        let mut creditors: Vec<_> = self
            .flows
            .iter()
            .filter(|(_, flow)| **flow > Decimal::ZERO)
            .map(|(p, &f)| (p.clone(), f))
            .collect();
        creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        creditors
    }

    /// Net debtors, sorted most-negative-first (largest owing first).
    /// Ties break by name so the ordering is deterministic.
    pub fn debtors(&self) -> Vec<(PersonId, Decimal)> {
        let mut debtors: Vec<_> = self
            .flows
            .iter()
            .filter(|(_, flow)| **flow < Decimal::ZERO)
            .map(|(p, &f)| (p.clone(), f))
            .collect();
        debtors.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        debtors
    }

    /// Number of people with a nonzero flow.
    pub fn nonzero_count(&self) -> usize {
        self.flows.values().filter(|f| **f != Decimal::ZERO).count()
    }

    /// Verify that the ledger is balanced: the sum of all flows is zero.
    ///
    /// Every debt contributes equal and opposite amounts to its two ends,
    /// so this holds for any ledger built from a graph.
    pub fn is_balanced(&self) -> bool {
        self.flows.values().sum::<Decimal>() == Decimal::ZERO
    }

    /// Total amount that actually needs to change hands: the sum of all
    /// positive flows (equal to the sum of |negative| flows).
    pub fn total_outstanding(&self) -> Decimal {
        self.flows
            .values()
            .filter(|f| **f > Decimal::ZERO)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_graph() -> DebtGraph {
        let mut graph = DebtGraph::with_people(["alice", "bob", "charlie"]).unwrap();
        graph.add(&"alice".into(), &"bob".into(), dec!(20)).unwrap();
        graph.add(&"alice".into(), &"charlie".into(), dec!(5)).unwrap();
        graph.add(&"bob".into(), &"alice".into(), dec!(10)).unwrap();
        graph
    }

    #[test]
    fn test_flows_from_graph() {
        let ledger = FlowLedger::from_graph(&sample_graph());
        // alice is owed 25, owes 10
        assert_eq!(ledger.flow(&"alice".into()), dec!(15));
        // bob is owed 10, owes 20
        assert_eq!(ledger.flow(&"bob".into()), dec!(-10));
        // charlie owes 5
        assert_eq!(ledger.flow(&"charlie".into()), dec!(-5));
    }

    #[test]
    fn test_ledger_balanced() {
        let ledger = FlowLedger::from_graph(&sample_graph());
        assert!(ledger.is_balanced());
        assert_eq!(ledger.total_outstanding(), dec!(15));
    }

    #[test]
    fn test_creditor_debtor_ordering() {
        let ledger = FlowLedger::from_graph(&sample_graph());
        let creditors = ledger.creditors();
        assert_eq!(creditors, vec![("alice".into(), dec!(15))]);

        let debtors = ledger.debtors();
        assert_eq!(
            debtors,
            vec![("bob".into(), dec!(-10)), ("charlie".into(), dec!(-5))]
        );
    }

    #[test]
    fn test_isolated_person_has_zero_flow() {
        let graph = DebtGraph::with_people(["dora"]).unwrap();
        let ledger = FlowLedger::from_graph(&graph);
        assert_eq!(ledger.flow(&"dora".into()), Decimal::ZERO);
        assert_eq!(ledger.nonzero_count(), 0);
    }

    #[test]
    fn test_perfect_cycle_flows_cancel() {
        let mut graph = DebtGraph::with_people(["a", "b", "c"]).unwrap();
        graph.add(&"a".into(), &"b".into(), dec!(100)).unwrap();
        graph.add(&"b".into(), &"c".into(), dec!(100)).unwrap();
        graph.add(&"c".into(), &"a".into(), dec!(100)).unwrap();

        let ledger = FlowLedger::from_graph(&graph);
        assert_eq!(ledger.nonzero_count(), 0);
        assert_eq!(ledger.total_outstanding(), Decimal::ZERO);
    }
}
