//! Shortest augmenting path search (Edmonds–Karp)
//!
//! Breadth-first search over arcs with strictly positive residual
//! capacity. Shortest paths bound the number of augmentations by O(V·E)
//! regardless of capacity values. Frontier expansion follows arc
//! insertion order, so the same residual state always yields the same path.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::residual::ResidualNetwork;
use crate::algorithm::traits::{Capacity, FlowError, NodeId};

/// Ordered node sequence from source to sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    nodes: Vec<NodeId>,
}

impl AugmentingPath {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of arcs on the path
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(from, to)` pairs along the path
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Minimum residual capacity along the path
    pub fn bottleneck(&self, residual: &ResidualNetwork) -> Capacity {
        self.arcs()
            .map(|(u, v)| residual.residual_capacity(u, v))
            .min()
            .unwrap_or(0)
    }
}

/// Reusable BFS state for repeated searches on one residual network
#[derive(Debug, Clone)]
pub struct PathFinder {
    predecessor: Vec<Option<NodeId>>,
    visited: Vec<bool>,
    queue: VecDeque<NodeId>,
    /// Nodes dequeued across all searches
    nodes_visited: usize,
}

impl PathFinder {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            predecessor: vec![None; vertex_count],
            visited: vec![false; vertex_count],
            queue: VecDeque::with_capacity(vertex_count),
            nodes_visited: 0,
        }
    }

    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    /// Finds a shortest path of positive residual capacity, or `None` if the
    /// sink is unreachable
    pub fn find(
        &mut self,
        residual: &ResidualNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Option<AugmentingPath>, FlowError> {
        for node in [source, sink] {
            if !residual.contains(node) {
                return Err(FlowError::UnknownNode(node.to_string()));
            }
        }
        if source == sink {
            return Err(FlowError::SourceIsSink(source.to_string()));
        }

        let vertex_count = residual.vertex_count();
        if self.visited.len() != vertex_count {
            self.predecessor.resize(vertex_count, None);
            self.visited.resize(vertex_count, false);
        }
        self.predecessor.fill(None);
        self.visited.fill(false);
        self.queue.clear();

        self.visited[source.0] = true;
        self.queue.push_back(source);

        while let Some(vertex) = self.queue.pop_front() {
            self.nodes_visited += 1;

            for (succ, capacity) in residual.neighbors(vertex) {
                if capacity <= 0 || self.visited[succ.0] {
                    continue;
                }
                self.visited[succ.0] = true;
                self.predecessor[succ.0] = Some(vertex);

                if succ == sink {
                    return Ok(Some(self.trace_back(source, sink)));
                }
                self.queue.push_back(succ);
            }
        }

        Ok(None)
    }

    fn trace_back(&self, source: NodeId, sink: NodeId) -> AugmentingPath {
        let mut nodes = vec![sink];
        let mut vertex = sink;
        while vertex != source {
            match self.predecessor[vertex.0] {
                Some(prev) => {
                    nodes.push(prev);
                    vertex = prev;
                }
                None => break,
            }
        }
        nodes.reverse();
        AugmentingPath { nodes }
    }
}

/// One-shot augmenting path search
pub fn find_augmenting_path(
    residual: &ResidualNetwork,
    source: NodeId,
    sink: NodeId,
) -> Result<Option<AugmentingPath>, FlowError> {
    PathFinder::new(residual.vertex_count()).find(residual, source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::CapacitatedGraph;

    #[test]
    fn test_shortest_path_preferred() {
        // s -> a -> b -> t is longer than s -> c -> t
        let graph = CapacitatedGraph::from_edges(vec![
            ("s", "a", 10),
            ("a", "b", 10),
            ("b", "t", 10),
            ("s", "c", 1),
            ("c", "t", 1),
        ])
        .unwrap();
        let residual = ResidualNetwork::initialize(&graph);
        let s = graph.node_id(&"s").unwrap();
        let t = graph.node_id(&"t").unwrap();

        let path = find_augmenting_path(&residual, s, t).unwrap().unwrap();
        let labels: Vec<_> = path.nodes().iter().map(|&n| *graph.label(n)).collect();
        assert_eq!(labels, vec!["s", "c", "t"]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.bottleneck(&residual), 1);
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        let graph = CapacitatedGraph::from_edges(vec![
            ("s", "b", 1),
            ("s", "a", 1),
            ("a", "t", 1),
            ("b", "t", 1),
        ])
        .unwrap();
        let residual = ResidualNetwork::initialize(&graph);
        let path = find_augmenting_path(&residual, NodeId(0), graph.node_id(&"t").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(*graph.label(path.nodes()[1]), "b");
    }

    #[test]
    fn test_zero_capacity_edges_are_not_traversed() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "a", 0), ("a", "t", 5)]).unwrap();
        let residual = ResidualNetwork::initialize(&graph);
        let result = find_augmenting_path(&residual, NodeId(0), NodeId(2)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unknown_and_identical_endpoints() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "t", 1)]).unwrap();
        let residual = ResidualNetwork::initialize(&graph);

        assert!(matches!(
            find_augmenting_path(&residual, NodeId(0), NodeId(5)),
            Err(FlowError::UnknownNode(_))
        ));
        assert!(matches!(
            find_augmenting_path(&residual, NodeId(0), NodeId(0)),
            Err(FlowError::SourceIsSink(_))
        ));
    }

    #[test]
    fn test_finder_reuse_counts_visits() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "m", 2), ("m", "t", 2)]).unwrap();
        let mut residual = ResidualNetwork::initialize(&graph);
        let mut finder = PathFinder::new(residual.vertex_count());
        let (s, t) = (NodeId(0), NodeId(2));

        let path = finder.find(&residual, s, t).unwrap().unwrap();
        for (u, v) in path.arcs().collect::<Vec<_>>() {
            residual.push(u, v, 2).unwrap();
        }
        assert!(finder.find(&residual, s, t).unwrap().is_none());
        assert!(finder.nodes_visited() >= 3);
    }
}
