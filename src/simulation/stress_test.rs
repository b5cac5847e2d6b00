//! Stress testing utilities for the debt graph.
//!
//! Generates random debt networks to exercise the simplification
//! algorithms under various conditions.

use crate::core::person::PersonId;
use crate::graph::debt_graph::DebtGraph;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random debt network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Number of people in the network.
    pub person_count: usize,
    /// Average number of debts per person.
    pub avg_debts_per_person: usize,
    /// Minimum debt amount.
    pub min_amount: Decimal,
    /// Maximum debt amount.
    pub max_amount: Decimal,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            person_count: 10,
            avg_debts_per_person: 3,
            min_amount: Decimal::from(1),
            max_amount: Decimal::from(1_000),
        }
    }
}

/// Generate a random debt graph for testing.
///
/// All generated debts are between distinct people with positive
/// amounts rounded to two decimal places, so the result satisfies
/// the graph invariants.
pub fn generate_random_graph(config: &NetworkConfig) -> DebtGraph {
    let mut rng = rand::thread_rng();

    let people: Vec<PersonId> = (0..config.person_count)
        .map(|i| PersonId::new(format!("person-{:03}", i)))
        .collect();
    let mut graph =
        DebtGraph::with_people(people.iter().cloned()).unwrap_or_else(|_| DebtGraph::new());

    if people.len() < 2 {
        return graph;
    }

    let total_debts = config.person_count * config.avg_debts_per_person;
    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(1.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(1_000.0);

    for _ in 0..total_debts {
        let creditor_idx = rng.gen_range(0..people.len());
        let mut debtor_idx = rng.gen_range(0..people.len());
        while debtor_idx == creditor_idx {
            debtor_idx = rng.gen_range(0..people.len());
        }

        let amount_f64 = rng.gen_range(min_f64..max_f64);
        let amount = Decimal::from_f64_retain(amount_f64)
            .unwrap_or(Decimal::ONE)
            .round_dp(2);

        if amount > Decimal::ZERO {
            let _ = graph.add(&people[creditor_idx], &people[debtor_idx], amount);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_graph_generation() {
        let config = NetworkConfig {
            person_count: 5,
            avg_debts_per_person: 3,
            ..Default::default()
        };

        let graph = generate_random_graph(&config);
        assert_eq!(graph.person_count(), 5);
        assert!(graph.edge_count() > 0);
        // distinct pairs only, aggregated
        assert!(graph.edge_count() <= 5 * 4);
    }

    #[test]
    fn test_random_graph_survives_cleanup() {
        let config = NetworkConfig {
            person_count: 20,
            avg_debts_per_person: 5,
            ..Default::default()
        };

        let mut graph = generate_random_graph(&config);
        let flows_before = graph.flows();
        let report = graph.cleanup();

        assert_eq!(graph.flows(), flows_before);
        assert!(report.edges_after <= report.edges_before);
        assert!(report.gross_after <= report.gross_before);
    }

    #[test]
    fn test_degenerate_single_person() {
        let config = NetworkConfig {
            person_count: 1,
            ..Default::default()
        };
        let graph = generate_random_graph(&config);
        assert_eq!(graph.person_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
