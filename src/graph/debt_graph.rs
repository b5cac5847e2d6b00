use crate::core::flow::FlowLedger;
use crate::core::person::PersonId;
use crate::simplify::engine::{SimplifyEngine, SimplifyReport};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors arising from debt graph operations.
///
/// Every failure is detected before any state is mutated, so a failed
/// operation always leaves the graph exactly as it was.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("person '{0}' not found")]
    UnknownPerson(PersonId),
    #[error("person '{0}' already exists")]
    DuplicatePerson(PersonId),
    #[error("no debt from {debtor} to {creditor}")]
    DebtNotFound { creditor: PersonId, debtor: PersonId },
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),
    #[error("debtors list must not be empty")]
    NoDebtors,
}

/// A directed graph of debts between people.
///
/// The graph maps `creditor → {debtor → amount}`: an edge records that
/// the debtor owes the creditor the given amount. Every person known to
/// the graph has an outer entry, so a person with no receivables is a
/// node with an empty inner map.
///
/// Invariants maintained by every operation:
///
/// - every creditor and debtor that appears is a known node
/// - stored amounts are strictly positive; an edge driven to zero or
///   below is deleted outright
/// - nobody ever owes themselves (operations that would create a
///   self-loop skip it silently)
///
/// # Examples
///
/// ```
/// use debtgraph::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut graph = DebtGraph::with_people(["alice", "bob"]).unwrap();
/// graph.add(&"alice".into(), &"bob".into(), dec!(20)).unwrap();
///
/// assert_eq!(graph.amount_owed(&"alice".into(), &"bob".into()), dec!(20));
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtGraph {
    graph: HashMap<PersonId, HashMap<PersonId, Decimal>>,
}

impl DebtGraph {
    /// Create an empty graph with no people.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph over the named people.
    ///
    /// Fails with [`GraphError::DuplicatePerson`] if a name repeats.
    pub fn with_people<I, S>(names: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        let mut graph = Self::new();
        for name in names {
            graph.add_person(name.into())?;
        }
        Ok(graph)
    }

    /// Build a graph from a previously produced mapping.
    ///
    /// The mapping is trusted to already satisfy the graph invariants;
    /// this is the counterpart of [`DebtGraph::as_map`] for persistence.
    pub fn from_map(map: HashMap<PersonId, HashMap<PersonId, Decimal>>) -> Self {
        Self { graph: map }
    }

    /// The full graph state as a serializable mapping.
    pub fn as_map(&self) -> &HashMap<PersonId, HashMap<PersonId, Decimal>> {
        &self.graph
    }

    // --- Inspection ---

    pub fn contains_person(&self, person: &PersonId) -> bool {
        self.graph.contains_key(person)
    }

    /// All people in the graph, sorted by name.
    pub fn people(&self) -> Vec<&PersonId> {
        let mut people: Vec<_> = self.graph.keys().collect();
        people.sort();
        people
    }

    pub fn person_count(&self) -> usize {
        self.graph.len()
    }

    /// Number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.values().map(|debts| debts.len()).sum()
    }

    /// All edges as `(creditor, debtor, amount)`, sorted for determinism.
    pub fn edges(&self) -> Vec<(&PersonId, &PersonId, Decimal)> {
        let mut edges: Vec<_> = self
            .graph
            .iter()
            .flat_map(|(creditor, debts)| {
                debts
                    .iter()
                    .map(move |(debtor, &amount)| (creditor, debtor, amount))
            })
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        edges
    }

    /// The amount the debtor owes the creditor. Zero if no such edge.
    pub fn amount_owed(&self, creditor: &PersonId, debtor: &PersonId) -> Decimal {
        self.graph
            .get(creditor)
            .and_then(|debts| debts.get(debtor))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Who owes this person, as `(debtor, amount)` sorted by name.
    pub fn owed_to(&self, person: &PersonId) -> Vec<(&PersonId, Decimal)> {
        let mut debts: Vec<_> = self
            .graph
            .get(person)
            .into_iter()
            .flat_map(|debts| debts.iter().map(|(debtor, &amount)| (debtor, amount)))
            .collect();
        debts.sort_by(|a, b| a.0.cmp(b.0));
        debts
    }

    /// Who this person owes, as `(creditor, amount)` sorted by name.
    pub fn owed_by(&self, person: &PersonId) -> Vec<(&PersonId, Decimal)> {
        let mut debts: Vec<_> = self
            .graph
            .iter()
            .filter_map(|(creditor, debts)| {
                debts.get(person).map(|&amount| (creditor, amount))
            })
            .collect();
        debts.sort_by(|a, b| a.0.cmp(b.0));
        debts
    }

    /// Sum of all edge amounts.
    pub fn gross_total(&self) -> Decimal {
        self.graph
            .values()
            .flat_map(|debts| debts.values())
            .sum()
    }

    /// Net flow of every person (owed to them minus what they owe).
    pub fn flows(&self) -> FlowLedger {
        FlowLedger::from_graph(self)
    }

    // --- Edge mutation ---

    /// Record that `debtor` owes `creditor` an additional `amount`.
    ///
    /// Adds to an existing edge or creates one. If `creditor == debtor`
    /// the call is a silent no-op: the split operation routes a
    /// creditor's own share here, and that share is simply dropped.
    pub fn add(
        &mut self,
        creditor: &PersonId,
        debtor: &PersonId,
        amount: Decimal,
    ) -> Result<(), GraphError> {
        if amount <= Decimal::ZERO {
            return Err(GraphError::InvalidAmount(amount));
        }
        self.require_person(creditor)?;
        self.require_person(debtor)?;
        if creditor == debtor {
            return Ok(());
        }
        self.insert_edge(creditor, debtor, amount);
        Ok(())
    }

    /// Split `amount` evenly across `debtors` and add each share as a
    /// debt to `creditor`.
    ///
    /// The divisor is the full length of `debtors`: if the creditor is
    /// listed (they paid for themselves too), they still count toward
    /// the divisor but their own share is skipped by [`DebtGraph::add`].
    ///
    /// Validation is all-or-nothing: every name is checked before any
    /// share is applied.
    pub fn split(
        &mut self,
        creditor: &PersonId,
        debtors: &[PersonId],
        amount: Decimal,
    ) -> Result<(), GraphError> {
        if debtors.is_empty() {
            return Err(GraphError::NoDebtors);
        }
        if amount <= Decimal::ZERO {
            return Err(GraphError::InvalidAmount(amount));
        }
        self.require_person(creditor)?;
        for debtor in debtors {
            self.require_person(debtor)?;
        }
        let share = amount / Decimal::from(debtors.len() as u64);
        for debtor in debtors {
            self.add(creditor, debtor, share)?;
        }
        Ok(())
    }

    /// Wipe out `amount` of the debtor's debt to the creditor.
    ///
    /// Removing more than is owed clears the edge; it never creates a
    /// reverse debt.
    pub fn remove(
        &mut self,
        creditor: &PersonId,
        debtor: &PersonId,
        amount: Decimal,
    ) -> Result<(), GraphError> {
        if amount <= Decimal::ZERO {
            return Err(GraphError::InvalidAmount(amount));
        }
        let owed = self.amount_owed(creditor, debtor);
        if owed == Decimal::ZERO {
            return Err(GraphError::DebtNotFound {
                creditor: creditor.clone(),
                debtor: debtor.clone(),
            });
        }
        if owed <= amount {
            self.remove_edge(creditor, debtor);
        } else {
            self.set_edge(creditor, debtor, owed - amount);
        }
        Ok(())
    }

    /// Forgive the entire debt from `debtor` to `creditor`.
    pub fn forgive(&mut self, creditor: &PersonId, debtor: &PersonId) -> Result<(), GraphError> {
        if self.amount_owed(creditor, debtor) == Decimal::ZERO {
            return Err(GraphError::DebtNotFound {
                creditor: creditor.clone(),
                debtor: debtor.clone(),
            });
        }
        self.remove_edge(creditor, debtor);
        Ok(())
    }

    // --- Person mutation ---

    /// Add a new person with no debts.
    ///
    /// Fails with [`GraphError::DuplicatePerson`] if the name is taken;
    /// silently overwriting would discard the existing person's debts.
    pub fn add_person(&mut self, person: impl Into<PersonId>) -> Result<(), GraphError> {
        let person = person.into();
        if self.graph.contains_key(&person) {
            return Err(GraphError::DuplicatePerson(person));
        }
        self.graph.insert(person, HashMap::new());
        Ok(())
    }

    /// Remove a person and every debt incident to them, in both directions.
    pub fn remove_person(&mut self, person: &PersonId) -> Result<(), GraphError> {
        if self.graph.remove(person).is_none() {
            return Err(GraphError::UnknownPerson(person.clone()));
        }
        for debts in self.graph.values_mut() {
            debts.remove(person);
        }
        Ok(())
    }

    /// Rename a person, preserving every incident debt in both directions.
    pub fn rename_person(&mut self, old: &PersonId, new: &PersonId) -> Result<(), GraphError> {
        if !self.graph.contains_key(old) {
            return Err(GraphError::UnknownPerson(old.clone()));
        }
        if self.graph.contains_key(new) {
            return Err(GraphError::DuplicatePerson(new.clone()));
        }
        let debts = self.graph.remove(old).unwrap_or_default();
        self.graph.insert(new.clone(), debts);
        for debts in self.graph.values_mut() {
            if let Some(amount) = debts.remove(old) {
                debts.insert(new.clone(), amount);
            }
        }
        Ok(())
    }

    // --- Simplification ---

    /// Cancel mutually-offsetting debt in every symmetric pair.
    pub fn cancel(&mut self) -> SimplifyReport {
        SimplifyEngine::cancel(self)
    }

    /// Collapse the graph to a minimal edge set reproducing the same
    /// net flows. Replaces this graph with a freshly built one.
    pub fn collapse(&mut self) -> SimplifyReport {
        SimplifyEngine::collapse(self)
    }

    /// Run [`DebtGraph::cancel`] then [`DebtGraph::collapse`].
    pub fn cleanup(&mut self) -> SimplifyReport {
        SimplifyEngine::cleanup(self)
    }

    // --- Internal helpers ---

    fn require_person(&self, person: &PersonId) -> Result<(), GraphError> {
        if self.graph.contains_key(person) {
            Ok(())
        } else {
            Err(GraphError::UnknownPerson(person.clone()))
        }
    }

    /// Accumulate onto an edge. Callers uphold the invariants: both ends
    /// known, positive amount, no self-loop.
    pub(crate) fn insert_edge(&mut self, creditor: &PersonId, debtor: &PersonId, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO);
        debug_assert_ne!(creditor, debtor);
        *self
            .graph
            .entry(creditor.clone())
            .or_default()
            .entry(debtor.clone())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Overwrite an edge amount. Same invariants as [`DebtGraph::insert_edge`].
    pub(crate) fn set_edge(&mut self, creditor: &PersonId, debtor: &PersonId, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO);
        if let Some(debts) = self.graph.get_mut(creditor) {
            debts.insert(debtor.clone(), amount);
        }
    }

    pub(crate) fn remove_edge(&mut self, creditor: &PersonId, debtor: &PersonId) {
        if let Some(debts) = self.graph.get_mut(creditor) {
            debts.remove(debtor);
        }
    }
}
