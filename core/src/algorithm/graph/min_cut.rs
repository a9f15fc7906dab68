//! Minimum cut extraction from a final residual network
//!
//! The source side S is every node reachable from the source over arcs of
//! positive residual capacity. Once no augmenting path remains, every
//! original edge leaving S is saturated, and the cut value equals the
//! maximum flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::error;
use serde::{Deserialize, Serialize};

use crate::algorithm::config::SolverConfig;
use crate::algorithm::graph::max_flow::FlowComputation;
use crate::algorithm::graph::residual::ResidualNetwork;
use crate::algorithm::traits::{Capacity, FlowError, NodeId};
use crate::data_structures::graph::{CapacitatedGraph, Label};

/// Original edge crossing from the source side to the sink side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutEdge<N> {
    pub from: N,
    pub to: N,
    pub capacity: Capacity,
}

/// s–t cut with its capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut<N> {
    /// Sum of capacities of edges from `reachable_set` to `other_set`
    pub cut_value: Capacity,
    /// Source side, in node insertion order
    pub reachable_set: Vec<N>,
    /// Sink side, in node insertion order
    pub other_set: Vec<N>,
    /// Crossing edges, in edge insertion order
    pub cut_edges: Vec<CutEdge<N>>,
}

impl<N: PartialEq> MinCut<N> {
    pub fn is_reachable(&self, node: &N) -> bool {
        self.reachable_set.contains(node)
    }

    /// Whether the cut places `source` and `sink` on opposite sides
    pub fn separates(&self, source: &N, sink: &N) -> bool {
        self.is_reachable(source) && self.other_set.contains(sink)
    }
}

/// Nodes reachable from `source` over positive residual arcs
pub fn reachable_from(residual: &ResidualNetwork, source: NodeId) -> Vec<bool> {
    let mut reachable = vec![false; residual.vertex_count()];
    if !residual.contains(source) {
        return reachable;
    }

    let mut queue = VecDeque::from([source]);
    reachable[source.0] = true;

    while let Some(vertex) = queue.pop_front() {
        for (succ, capacity) in residual.neighbors(vertex) {
            if capacity > 0 && !reachable[succ.0] {
                reachable[succ.0] = true;
                queue.push_back(succ);
            }
        }
    }

    reachable
}

/// Derives the cut induced by residual reachability from `source`
///
/// Read-only with respect to both the graph and the residual network.
pub fn extract_min_cut<N: Label>(
    graph: &CapacitatedGraph<N>,
    residual: &ResidualNetwork,
    source: NodeId,
) -> Result<MinCut<N>, FlowError> {
    let reachable = reachable_from(residual, source);
    if !reachable.get(source.0).copied().unwrap_or(false) {
        error!("Source {} missing from its own reachable set", source);
        return Err(FlowError::Disconnected(source.to_string()));
    }

    let mut reachable_set = Vec::new();
    let mut other_set = Vec::new();
    for (index, label) in graph.nodes().enumerate() {
        if reachable[index] {
            reachable_set.push(label.clone());
        } else {
            other_set.push(label.clone());
        }
    }

    let mut cut_value: Capacity = 0;
    let mut cut_edges = Vec::new();
    for edge in graph.raw_edges() {
        if reachable[edge.from.0] && !reachable[edge.to.0] {
            cut_value += edge.capacity;
            cut_edges.push(CutEdge {
                from: graph.label(edge.from).clone(),
                to: graph.label(edge.to).clone(),
                capacity: edge.capacity,
            });
        }
    }

    Ok(MinCut {
        cut_value,
        reachable_set,
        other_set,
        cut_edges,
    })
}

/// Minimum s–t cut of `graph`
///
/// Runs a full max-flow computation and verifies that the resulting cut
/// value equals the flow value.
pub fn compute_min_cut<N: Label>(
    graph: &CapacitatedGraph<N>,
    source: &N,
    sink: &N,
) -> Result<MinCut<N>, FlowError> {
    let mut computation = FlowComputation::new(graph, source, sink, SolverConfig::default())?;
    computation.run()?;
    let total_flow = computation.total_flow();
    let cut = computation.extract_cut()?;

    if cut.cut_value != total_flow {
        error!(
            "Cut value {} differs from max flow {}",
            cut.cut_value, total_flow
        );
        return Err(FlowError::InvariantViolation(format!(
            "cut value {} != max flow {}",
            cut.cut_value, total_flow
        )));
    }

    Ok(cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_on_diamond() {
        let graph = CapacitatedGraph::from_edges(vec![
            ("s", "a", 3),
            ("s", "b", 2),
            ("a", "t", 1),
            ("b", "t", 5),
        ])
        .unwrap();

        let cut = compute_min_cut(&graph, &"s", &"t").unwrap();
        assert_eq!(cut.cut_value, 3);
        assert_eq!(cut.reachable_set, vec!["s", "a"]);
        assert_eq!(cut.other_set, vec!["b", "t"]);
        assert!(cut.separates(&"s", &"t"));

        let crossing: Vec<_> = cut.cut_edges.iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(crossing, vec![("s", "b"), ("a", "t")]);
    }

    #[test]
    fn test_untouched_residual_reaches_everything_positive() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "a", 1), ("a", "b", 0)]).unwrap();
        let residual = ResidualNetwork::initialize(&graph);
        let reachable = reachable_from(&residual, NodeId(0));
        assert_eq!(reachable, vec![true, true, false]);
    }

    #[test]
    fn test_unknown_endpoints() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "t", 1)]).unwrap();
        assert!(matches!(
            compute_min_cut(&graph, &"s", &"nowhere"),
            Err(FlowError::UnknownNode(_))
        ));
    }
}
