//! A month of roommate expenses, collapsed to the minimum payments.
//!
//! Four roommates rack up debts in every direction; cleanup reduces
//! the tangle to at most three transfers.

use debtgraph::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("=== debtgraph: Roommates ===\n");

    let mut graph = DebtGraph::with_people(["ana", "ben", "cleo", "dev"]).unwrap();

    // rent, groceries, utilities, takeout...
    graph.add(&"ana".into(), &"ben".into(), dec!(450)).unwrap();
    graph.add(&"ana".into(), &"cleo".into(), dec!(450)).unwrap();
    graph.add(&"ana".into(), &"dev".into(), dec!(450)).unwrap();
    graph.add(&"ben".into(), &"ana".into(), dec!(120.75)).unwrap();
    graph.add(&"ben".into(), &"cleo".into(), dec!(120.75)).unwrap();
    graph.add(&"cleo".into(), &"dev".into(), dec!(64.20)).unwrap();
    graph.add(&"dev".into(), &"ana".into(), dec!(33)).unwrap();
    graph.add(&"dev".into(), &"ben".into(), dec!(33)).unwrap();

    println!("the month's ledger ({} debts):", graph.edge_count());
    for (creditor, debtor, amount) in graph.edges() {
        println!("  {} owes {} {}", debtor, creditor, amount);
    }

    let ledger = graph.flows();
    println!("\nnet positions:");
    for person in graph.people() {
        println!("  {}: {}", person, ledger.flow(person));
    }

    let report = graph.cleanup();
    println!("\nafter cleanup ({} transfers):", graph.edge_count());
    for (creditor, debtor, amount) in graph.edges() {
        println!("  {} pays {} {}", debtor, creditor, amount);
    }
    println!("\n{}", report);
}
