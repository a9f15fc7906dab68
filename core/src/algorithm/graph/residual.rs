//! Residual network with paired forward/reverse arcs
//!
//! Every ordered pair that appears as an edge in either direction owns two
//! arcs that reference each other. Pushing flow along one arc moves the
//! same amount of residual capacity onto its partner, so the sum over a
//! pair is conserved for the lifetime of the network.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::trace;

use crate::algorithm::traits::{Capacity, FlowError, NodeId};
use crate::data_structures::graph::{CapacitatedGraph, Label};

/// Residual arc with a link to its reverse partner
#[derive(Debug, Clone)]
struct ResidualArc {
    /// Target vertex
    to: NodeId,
    /// Remaining capacity
    residual: Capacity,
    /// Index of the reverse arc (itself for self-loops)
    reverse: usize,
}

/// Mutable residual state of one flow computation
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    /// Number of vertices in network
    vertex_count: usize,
    /// Arc indices per vertex, in order of first appearance
    adjacency: Vec<Vec<usize>>,
    /// All arcs in the network
    arcs: Vec<ResidualArc>,
    /// Ordered pair to arc index
    lookup: HashMap<(NodeId, NodeId), usize>,
}

impl ResidualNetwork {
    /// Builds the residual network of a graph carrying zero flow
    pub fn initialize<N: Label>(graph: &CapacitatedGraph<N>) -> Self {
        let vertex_count = graph.node_count();
        let mut network = Self {
            vertex_count,
            adjacency: vec![Vec::new(); vertex_count],
            arcs: Vec::with_capacity(graph.edge_count() * 2),
            lookup: HashMap::with_capacity(graph.edge_count() * 2),
        };

        for edge in graph.raw_edges() {
            let index = network.ensure_pair(edge.from, edge.to);
            network.arcs[index].residual += edge.capacity;
        }

        trace!(
            "Residual network initialized: {} vertices, {} arcs",
            network.vertex_count,
            network.arcs.len()
        );
        network
    }

    /// Returns the forward arc index for `(from, to)`, creating the pair if needed
    fn ensure_pair(&mut self, from: NodeId, to: NodeId) -> usize {
        if let Some(&index) = self.lookup.get(&(from, to)) {
            return index;
        }

        let forward = self.arcs.len();
        if from == to {
            self.arcs.push(ResidualArc {
                to,
                residual: 0,
                reverse: forward,
            });
            self.adjacency[from.0].push(forward);
            self.lookup.insert((from, to), forward);
            return forward;
        }

        let reverse = forward + 1;
        self.arcs.push(ResidualArc {
            to,
            residual: 0,
            reverse,
        });
        self.arcs.push(ResidualArc {
            to: from,
            residual: 0,
            reverse: forward,
        });
        self.adjacency[from.0].push(forward);
        self.adjacency[to.0].push(reverse);
        self.lookup.insert((from, to), forward);
        self.lookup.insert((to, from), reverse);
        forward
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.vertex_count
    }

    /// Current residual capacity of `from -> to`; 0 for untracked pairs
    pub fn residual_capacity(&self, from: NodeId, to: NodeId) -> Capacity {
        self.lookup
            .get(&(from, to))
            .map_or(0, |&index| self.arcs[index].residual)
    }

    /// Arcs leaving `node` as `(target, residual)`, in insertion order
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Capacity)> + '_ {
        self.adjacency
            .get(node.0)
            .into_iter()
            .flatten()
            .map(move |&index| {
                let arc = &self.arcs[index];
                (arc.to, arc.residual)
            })
    }

    /// Pushes `amount` units along `from -> to`
    ///
    /// The only mutator of residual state: decrements `r(from, to)` and
    /// increments `r(to, from)` by the same amount.
    pub fn push(&mut self, from: NodeId, to: NodeId, amount: Capacity) -> Result<(), FlowError> {
        if amount < 0 {
            return Err(FlowError::InvalidCapacity {
                from: from.to_string(),
                to: to.to_string(),
                capacity: amount,
            });
        }

        let available = self.residual_capacity(from, to);
        if amount > available {
            return Err(FlowError::InsufficientResidual {
                from,
                to,
                requested: amount,
                available,
            });
        }
        if amount == 0 {
            return Ok(());
        }

        // amount > 0 implies the pair is tracked
        let index = self.lookup[&(from, to)];
        let reverse = self.arcs[index].reverse;
        if reverse != index {
            let raised = self.arcs[reverse].residual.checked_add(amount).ok_or_else(|| {
                FlowError::InvariantViolation(format!(
                    "residual capacity of {} -> {} overflowed",
                    to, from
                ))
            })?;
            self.arcs[reverse].residual = raised;
            self.arcs[index].residual -= amount;
        }

        trace!("Pushed {} along {} -> {}", amount, from, to);
        Ok(())
    }

    /// Sum of residual capacities in both directions between `u` and `v`
    pub fn pair_total(&self, u: NodeId, v: NodeId) -> Capacity {
        if u == v {
            return self.residual_capacity(u, v);
        }
        self.residual_capacity(u, v) + self.residual_capacity(v, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_way_graph() -> CapacitatedGraph<&'static str> {
        CapacitatedGraph::from_edges(vec![("a", "b", 5), ("b", "a", 2), ("b", "c", 4)]).unwrap()
    }

    #[test]
    fn test_initialization_is_additive() {
        let graph = two_way_graph();
        let network = ResidualNetwork::initialize(&graph);
        let (a, b, c) = (NodeId(0), NodeId(1), NodeId(2));

        assert_eq!(network.vertex_count(), 3);
        // (a,b) and (b,c) pairs, two arcs each
        assert_eq!(network.arc_count(), 4);
        assert_eq!(network.residual_capacity(a, b), 5);
        assert_eq!(network.residual_capacity(b, a), 2);
        assert_eq!(network.residual_capacity(b, c), 4);
        assert_eq!(network.residual_capacity(c, b), 0);
    }

    #[test]
    fn test_untracked_pair_is_zero() {
        let network = ResidualNetwork::initialize(&two_way_graph());
        assert_eq!(network.residual_capacity(NodeId(0), NodeId(2)), 0);
        assert_eq!(network.residual_capacity(NodeId(7), NodeId(9)), 0);
        assert_eq!(network.neighbors(NodeId(9)).count(), 0);
    }

    #[test]
    fn test_push_conserves_pair_total() {
        let mut network = ResidualNetwork::initialize(&two_way_graph());
        let (a, b) = (NodeId(0), NodeId(1));

        network.push(a, b, 3).unwrap();
        assert_eq!(network.residual_capacity(a, b), 2);
        assert_eq!(network.residual_capacity(b, a), 5);
        assert_eq!(network.pair_total(a, b), 7);

        network.push(b, a, 5).unwrap();
        assert_eq!(network.residual_capacity(a, b), 7);
        assert_eq!(network.residual_capacity(b, a), 0);
        assert_eq!(network.pair_total(a, b), 7);
    }

    #[test]
    fn test_push_beyond_residual_fails() {
        let mut network = ResidualNetwork::initialize(&two_way_graph());
        let (b, c) = (NodeId(1), NodeId(2));

        let err = network.push(c, b, 1).unwrap_err();
        assert_eq!(
            err,
            FlowError::InsufficientResidual {
                from: c,
                to: b,
                requested: 1,
                available: 0
            }
        );
        assert!(network.push(b, c, 5).is_err());
        assert!(network.push(b, c, -1).is_err());
        // State untouched by failed pushes
        assert_eq!(network.residual_capacity(b, c), 4);
    }

    #[test]
    fn test_neighbor_order_follows_edge_insertion() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "x", 1), ("y", "s", 1), ("s", "z", 1)])
            .unwrap();
        let network = ResidualNetwork::initialize(&graph);
        let targets: Vec<_> = network.neighbors(NodeId(0)).map(|(to, _)| to).collect();
        assert_eq!(targets, vec![NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_self_loop_has_single_arc() {
        let graph = CapacitatedGraph::from_edges(vec![("a", "a", 3)]).unwrap();
        let mut network = ResidualNetwork::initialize(&graph);
        assert_eq!(network.arc_count(), 1);
        network.push(NodeId(0), NodeId(0), 2).unwrap();
        assert_eq!(network.residual_capacity(NodeId(0), NodeId(0)), 3);
    }

    #[test]
    fn test_push_at_capacity_limit() {
        let graph =
            CapacitatedGraph::from_edges(vec![("a", "b", i64::MAX), ("b", "a", 0)]).unwrap();
        let mut network = ResidualNetwork::initialize(&graph);
        let (a, b) = (NodeId(0), NodeId(1));

        network.push(a, b, i64::MAX).unwrap();
        assert_eq!(network.residual_capacity(b, a), i64::MAX);
        assert_eq!(network.pair_total(a, b), i64::MAX);

        // Corrupt the forward arc so the next push would overflow its partner
        network.arcs[0].residual = 1;
        let err = network.push(a, b, 1).unwrap_err();
        assert!(matches!(err, FlowError::InvariantViolation(_)));
        assert_eq!(network.residual_capacity(a, b), 1);
        assert_eq!(network.residual_capacity(b, a), i64::MAX);
    }
}
