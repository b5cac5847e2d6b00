//! Splitting a shared bill and cancelling the fallout.
//!
//! Demonstrates the split operation (the payer counts toward the
//! divisor but never owes themselves) and pairwise cancellation.

use debtgraph::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("=== debtgraph: Split Dinner ===\n");

    let mut graph = DebtGraph::with_people(["alice", "bob", "charlie"]).unwrap();

    // alice pays 60 for dinner for all three of them
    graph
        .split(
            &"alice".into(),
            &["alice".into(), "bob".into(), "charlie".into()],
            dec!(60),
        )
        .unwrap();
    println!("alice pays 60 for the table of three:");
    show(&graph);

    // bob pays alice's 35 concert ticket
    graph.add(&"bob".into(), &"alice".into(), dec!(35)).unwrap();
    println!("\nbob covers alice's 35 ticket:");
    show(&graph);

    // mutual debt between alice and bob nets out
    let report = graph.cancel();
    println!("\nafter cancel:");
    show(&graph);
    println!("\n{}", report);
}

fn show(graph: &DebtGraph) {
    for (creditor, debtor, amount) in graph.edges() {
        println!("  {} owes {} {}", debtor, creditor, amount);
    }
}
