//! Max flow and min cut of the eight-node textbook network
//!
//! Prints both values, the per-edge flow, and the JSON snapshot a
//! renderer would draw. Run with `RUST_LOG=debug` to see each augmentation.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::info;
use maxflow_core::{CapacitatedGraph, FlowError, MaxFlowSolver, SolverConfig};

fn main() -> Result<(), FlowError> {
    env_logger::init();

    let graph = CapacitatedGraph::from_edges(vec![
        ("s", "v1", 8),
        ("s", "v2", 6),
        ("s", "v3", 5),
        ("v1", "v2", 5),
        ("v1", "v4", 7),
        ("v2", "v1", 4),
        ("v2", "v4", 2),
        ("v2", "v3", 12),
        ("v3", "v5", 9),
        ("v3", "v6", 2),
        ("v4", "v5", 2),
        ("v4", "t", 8),
        ("v5", "v2", 5),
        ("v5", "v6", 3),
        ("v5", "t", 8),
        ("v6", "t", 7),
    ])?;
    info!(
        "Loaded network with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let solver = MaxFlowSolver::new(SolverConfig::default().with_history());
    let (flow, cut) = solver.solve_with_cut(&graph, &"s", &"t")?;

    println!("min_cut:  {}", cut.cut_value);
    println!("max_flow: {}", flow.total_flow);
    println!("source side: {:?}", cut.reachable_set);
    println!("sink side:   {:?}", cut.other_set);

    println!("flow assignment:");
    for edge in &flow.edges {
        println!("  {:>2} -> {:<2} {:>2}/{:<2}", edge.from, edge.to, edge.flow, edge.capacity);
    }

    if let Some(history) = &flow.history {
        println!("augmenting paths:");
        for step in history.steps() {
            println!("  {:?} (+{} = {})", step.path, step.bottleneck, step.total_flow);
        }
    }

    println!("{}", flow.snapshot(&graph).to_json_pretty()?);
    Ok(())
}
