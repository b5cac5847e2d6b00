use crate::core::person::PersonId;
use crate::graph::debt_graph::DebtGraph;
use std::collections::{HashMap, HashSet, VecDeque};

/// A settlement component of the debt graph.
///
/// People in the same component are connected through debt chains
/// (ignoring edge direction), so all money among them must be settled
/// together. Because every edge of a component is internal to it, the
/// net flows within a component always sum to zero: each component can
/// be settled with no payment crossing its boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementComponent {
    /// Members of the component, sorted by name.
    pub people: Vec<PersonId>,
}

impl SettlementComponent {
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Returns true if this component contains more than one person
    /// (meaning there is anything to settle).
    pub fn is_settleable(&self) -> bool {
        self.people.len() > 1
    }
}

/// Partition the graph into settlement components.
///
/// Runs a breadth-first search over the undirected view of the edge set.
/// People with no debts in either direction come back as singleton
/// components. Components are ordered by their smallest member so the
/// result is deterministic.
///
/// Note this is connectivity, not zero-sum minimality: a connected
/// component may still contain a proper subset whose flows sum to zero,
/// but finding such subsets is a subset-sum search and is deliberately
/// not attempted here.
pub fn settlement_components(graph: &DebtGraph) -> Vec<SettlementComponent> {
    let mut adj: HashMap<&PersonId, Vec<&PersonId>> = HashMap::new();
    for person in graph.people() {
        adj.entry(person).or_default();
    }
    for (creditor, debtor, _) in graph.edges() {
        adj.entry(creditor).or_default().push(debtor);
        adj.entry(debtor).or_default().push(creditor);
    }

    let mut visited: HashSet<&PersonId> = HashSet::new();
    let mut components = Vec::new();

    for start in graph.people() {
        if visited.contains(start) {
            continue;
        }
        let mut members = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(person) = queue.pop_front() {
            members.push(person.clone());
            for &neighbor in &adj[person] {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        members.sort();
        components.push(SettlementComponent { people: members });
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn p(name: &str) -> PersonId {
        PersonId::new(name)
    }

    #[test]
    fn test_single_component() {
        let mut graph = DebtGraph::with_people(["a", "b", "c"]).unwrap();
        graph.add(&p("a"), &p("b"), dec!(100)).unwrap();
        graph.add(&p("b"), &p("c"), dec!(100)).unwrap();

        let components = settlement_components(&graph);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].people, vec![p("a"), p("b"), p("c")]);
    }

    #[test]
    fn test_disjoint_components() {
        let mut graph = DebtGraph::with_people(["a", "b", "c", "d"]).unwrap();
        graph.add(&p("a"), &p("b"), dec!(100)).unwrap();
        graph.add(&p("c"), &p("d"), dec!(50)).unwrap();

        let components = settlement_components(&graph);
        let settleable: Vec<_> = components.iter().filter(|c| c.is_settleable()).collect();
        assert_eq!(settleable.len(), 2);
        assert_eq!(settleable[0].people, vec![p("a"), p("b")]);
        assert_eq!(settleable[1].people, vec![p("c"), p("d")]);
    }

    #[test]
    fn test_direction_is_ignored() {
        // a <- b -> c is one component even though a and c share no edge
        let mut graph = DebtGraph::with_people(["a", "b", "c"]).unwrap();
        graph.add(&p("b"), &p("a"), dec!(10)).unwrap();
        graph.add(&p("b"), &p("c"), dec!(10)).unwrap();

        let components = settlement_components(&graph);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
    }

    #[test]
    fn test_isolated_people_are_singletons() {
        let mut graph = DebtGraph::with_people(["a", "b", "loner"]).unwrap();
        graph.add(&p("a"), &p("b"), dec!(10)).unwrap();

        let components = settlement_components(&graph);
        assert_eq!(components.len(), 2);
        let singleton = components.iter().find(|c| !c.is_settleable()).unwrap();
        assert_eq!(singleton.people, vec![p("loner")]);
    }
}
