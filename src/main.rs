//! debtgraph CLI
//!
//! Track shared debts in a JSON file and simplify them on demand.
//!
//! # Usage
//!
//! ```bash
//! # Start a graph for three people
//! debtgraph init --file tab.json --people alice,bob,charlie
//!
//! # alice paid 30 for everyone (herself included)
//! debtgraph split --file tab.json --creditor alice --debtors alice,bob,charlie --amount 30
//!
//! # Minimize the graph
//! debtgraph cleanup --file tab.json
//!
//! # Inspect
//! debtgraph show --file tab.json
//! debtgraph flows --file tab.json
//! ```

use debtgraph::core::person::PersonId;
use debtgraph::graph::debt_graph::{DebtGraph, GraphError};
use debtgraph::simplify::engine::SimplifyReport;
use debtgraph::simulation::stress_test::{generate_random_graph, NetworkConfig};
use debtgraph::store;
use log::info;
use rust_decimal::Decimal;
use std::process;

fn print_usage() {
    eprintln!(
        r#"debtgraph — shared-expense debt tracking and settlement simplification

USAGE:
    debtgraph <COMMAND> [OPTIONS]

COMMANDS:
    init           Create a new graph file with the given people
    show           Print the current debts
    flows          Print each person's net position
    add            Record a debt from one person to another
    split          Split an amount evenly across several debtors
    remove         Wipe out part of a debt
    forgive        Delete a debt entirely
    add-person     Add a person with no debts
    remove-person  Remove a person and all their debts
    rename-person  Rename a person, keeping their debts
    cancel         Net mutually-offsetting debts per pair
    collapse       Rebuild the graph from net flows with minimal edges
    cleanup        Run cancel then collapse
    generate       Generate a random graph (for testing)
    help           Show this message

OPTIONS:
    --file <FILE>       Path to the graph JSON file (most commands)
    --format <FORMAT>   Output format for show/flows: text (default) or json
    --people <LIST>     Comma-separated names (init); count (generate)
    --creditor <NAME>   The person owed money
    --debtor <NAME>     The person owing money
    --debtors <LIST>    Comma-separated debtor names (split)
    --amount <N>        A positive decimal amount
    --name <NAME>       Person name (add-person, remove-person)
    --from/--to <NAME>  Old and new names (rename-person)
    --debts <N>         Number of random debts (generate)
    --output <FILE>     Output path (generate)

EXAMPLES:
    debtgraph init --file tab.json --people alice,bob,charlie
    debtgraph add --file tab.json --creditor alice --debtor bob --amount 20
    debtgraph split --file tab.json --creditor bob --debtors alice,bob,charlie --amount 15
    debtgraph cleanup --file tab.json
    debtgraph generate --people 10 --debts 30 --output random.json"#
    );
}

/// Scan `args` for `--name value`.
fn flag(args: &[String], name: &str) -> Option<String> {
    let key = format!("--{}", name);
    args.iter()
        .position(|a| *a == key)
        .and_then(|i| args.get(i + 1).cloned())
}

fn required(args: &[String], name: &str) -> String {
    flag(args, name).unwrap_or_else(|| {
        eprintln!("Error: --{} <VALUE> is required", name);
        process::exit(1);
    })
}

fn parse_amount(raw: &str) -> Decimal {
    let amount: Decimal = raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid amount '{}': {}", raw, e);
        process::exit(1);
    });
    if amount <= Decimal::ZERO {
        eprintln!("Invalid amount '{}': must be positive", raw);
        process::exit(1);
    }
    amount
}

fn parse_names(raw: &str) -> Vec<PersonId> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PersonId::new)
        .collect()
}

fn load_graph(args: &[String]) -> (String, DebtGraph) {
    let path = required(args, "file");
    let graph = store::load(&path).unwrap_or_else(|e| {
        eprintln!("Error loading '{}': {}", path, e);
        process::exit(1);
    });
    (path, graph)
}

fn save_graph(path: &str, graph: &DebtGraph) {
    store::save(path, graph).unwrap_or_else(|e| {
        eprintln!("Error saving '{}': {}", path, e);
        process::exit(1);
    });
}

fn fail(err: GraphError) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}

fn print_graph(graph: &DebtGraph, format: &str) {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(graph).unwrap());
        return;
    }
    if graph.edge_count() == 0 {
        println!("No debts. {} people are all square.", graph.person_count());
        return;
    }
    for (creditor, debtor, amount) in graph.edges() {
        println!("{} owes {} {}", debtor, creditor, amount);
    }
}

fn print_flows(graph: &DebtGraph, format: &str) {
    let ledger = graph.flows();
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&ledger).unwrap());
        return;
    }
    for person in graph.people() {
        let flow = ledger.flow(person);
        let status = if flow > Decimal::ZERO {
            "is owed"
        } else if flow < Decimal::ZERO {
            "owes"
        } else {
            "is settled"
        };
        println!("{} {} {}", person, status, flow.abs());
    }
}

fn print_report(report: &SimplifyReport) {
    print!("{}", report);
}

fn cmd_init(args: &[String]) {
    let path = required(args, "file");
    let people = parse_names(&required(args, "people"));
    let graph = DebtGraph::with_people(people).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    println!("Created {} with {} people", path, graph.person_count());
}

fn cmd_show(args: &[String]) {
    let (_, graph) = load_graph(args);
    let format = flag(args, "format").unwrap_or_else(|| "text".to_string());
    print_graph(&graph, &format);
}

fn cmd_flows(args: &[String]) {
    let (_, graph) = load_graph(args);
    let format = flag(args, "format").unwrap_or_else(|| "text".to_string());
    print_flows(&graph, &format);
}

fn cmd_add(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let creditor = PersonId::new(required(args, "creditor"));
    let debtor = PersonId::new(required(args, "debtor"));
    let amount = parse_amount(&required(args, "amount"));

    graph.add(&creditor, &debtor, amount).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    info!("added debt: {} owes {} {}", debtor, creditor, amount);
    println!("{} now owes {} {}", debtor, creditor, graph.amount_owed(&creditor, &debtor));
}

fn cmd_split(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let creditor = PersonId::new(required(args, "creditor"));
    let debtors = parse_names(&required(args, "debtors"));
    let amount = parse_amount(&required(args, "amount"));

    graph.split(&creditor, &debtors, amount).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    info!(
        "split {} from {} across {} debtors",
        amount,
        creditor,
        debtors.len()
    );
    println!("Split {} across {} people", amount, debtors.len());
}

fn cmd_remove(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let creditor = PersonId::new(required(args, "creditor"));
    let debtor = PersonId::new(required(args, "debtor"));
    let amount = parse_amount(&required(args, "amount"));

    graph.remove(&creditor, &debtor, amount).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    let remaining = graph.amount_owed(&creditor, &debtor);
    if remaining > Decimal::ZERO {
        println!("{} still owes {} {}", debtor, creditor, remaining);
    } else {
        println!("{} no longer owes {}", debtor, creditor);
    }
}

fn cmd_forgive(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let creditor = PersonId::new(required(args, "creditor"));
    let debtor = PersonId::new(required(args, "debtor"));

    graph.forgive(&creditor, &debtor).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    println!("Forgave {}'s debt to {}", debtor, creditor);
}

fn cmd_add_person(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let name = PersonId::new(required(args, "name"));

    graph.add_person(name.clone()).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    println!("Added {}", name);
}

fn cmd_remove_person(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let name = PersonId::new(required(args, "name"));

    graph.remove_person(&name).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    println!("Removed {} and all their debts", name);
}

fn cmd_rename_person(args: &[String]) {
    let (path, mut graph) = load_graph(args);
    let old = PersonId::new(required(args, "from"));
    let new = PersonId::new(required(args, "to"));

    graph.rename_person(&old, &new).unwrap_or_else(|e| fail(e));
    save_graph(&path, &graph);
    println!("Renamed {} to {}", old, new);
}

fn cmd_simplify(args: &[String], which: &str) {
    let (path, mut graph) = load_graph(args);
    let report = match which {
        "cancel" => graph.cancel(),
        "collapse" => graph.collapse(),
        _ => graph.cleanup(),
    };
    save_graph(&path, &graph);
    info!(
        "{}: {} edges -> {} edges",
        which, report.edges_before, report.edges_after
    );
    print_report(&report);
}

fn cmd_generate(args: &[String]) {
    let people = flag(args, "people")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10usize);
    let debts = flag(args, "debts")
        .and_then(|s| s.parse().ok())
        .unwrap_or(30usize);
    let output = required(args, "output");

    let config = NetworkConfig {
        person_count: people,
        avg_debts_per_person: debts / people.max(1),
        ..Default::default()
    };
    let graph = generate_random_graph(&config);
    save_graph(&output, &graph);
    println!(
        "Generated {} people and {} edges -> {}",
        graph.person_count(),
        graph.edge_count(),
        output
    );
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "init" => cmd_init(rest),
        "show" => cmd_show(rest),
        "flows" => cmd_flows(rest),
        "add" => cmd_add(rest),
        "split" => cmd_split(rest),
        "remove" => cmd_remove(rest),
        "forgive" => cmd_forgive(rest),
        "add-person" => cmd_add_person(rest),
        "remove-person" => cmd_remove_person(rest),
        "rename-person" => cmd_rename_person(rest),
        "cancel" | "collapse" | "cleanup" => cmd_simplify(rest, command),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
