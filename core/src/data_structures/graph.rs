//! Capacitated directed graph
//!
//! Ground-truth structure for flow computations: interned node labels,
//! directed edges with non-negative integer capacities, and O(1) edge
//! lookup by ordered endpoint pair. Iteration order is always
//! first-inserted-first so that every derived result is reproducible.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, FlowError, NodeId};

/// Bounds required of a node label
pub trait Label: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Label for T {}

/// Directed edge between interned nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
}

/// Directed graph with per-edge capacities
///
/// At most one edge exists per ordered pair; `(u, v)` and `(v, u)` are
/// distinct edges. Re-adding an edge with its existing capacity is a
/// no-op, re-adding it with a different capacity is a `DuplicateEdge`
/// error. Failed insertions leave the graph unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    into = "EdgeListRecord<N>",
    try_from = "EdgeListRecord<N>",
    bound(
        serialize = "N: Label + Serialize",
        deserialize = "N: Label + Deserialize<'de>"
    )
)]
pub struct CapacitatedGraph<N> {
    /// Node labels indexed by `NodeId`
    labels: Vec<N>,
    /// Label interning table
    index: HashMap<N, NodeId>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    /// Ordered pair to position in `edges`
    lookup: HashMap<(NodeId, NodeId), usize>,
}

/// Serialized form of a graph: node list plus `(from, to, capacity)` triples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeListRecord<N> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<N>,
    pub edges: Vec<(N, N, Capacity)>,
}

impl<N: Label> Default for CapacitatedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Label> CapacitatedGraph<N> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Builds a graph from `(from, to, capacity)` triples, stopping at the
    /// first rejected triple
    pub fn from_edges<I>(edges: I) -> Result<Self, FlowError>
    where
        I: IntoIterator<Item = (N, N, Capacity)>,
    {
        let mut graph = Self::new();
        for (from, to, capacity) in edges {
            graph.add_edge(from, to, capacity)?;
        }
        Ok(graph)
    }

    /// Adds a node without edges; returns the existing id if already present
    pub fn add_node(&mut self, label: N) -> NodeId {
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = NodeId(self.labels.len());
        self.labels.push(label.clone());
        self.index.insert(label, id);
        id
    }

    /// Adds a directed edge with the given capacity
    ///
    /// Capacities of an antiparallel pair share one residual pair, so
    /// their sum must fit in `Capacity`.
    pub fn add_edge(&mut self, from: N, to: N, capacity: Capacity) -> Result<(), FlowError> {
        if capacity < 0 {
            return Err(FlowError::InvalidCapacity {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
                capacity,
            });
        }

        if let (Some(&u), Some(&v)) = (self.index.get(&from), self.index.get(&to)) {
            if let Some(&position) = self.lookup.get(&(u, v)) {
                if self.edges[position].capacity == capacity {
                    return Ok(());
                }
                return Err(FlowError::DuplicateEdge {
                    from: format!("{:?}", from),
                    to: format!("{:?}", to),
                });
            }
        }

        if let Some(reverse) = self.capacity(&to, &from) {
            if capacity.checked_add(reverse).is_none() {
                return Err(FlowError::InvalidCapacity {
                    from: format!("{:?}", from),
                    to: format!("{:?}", to),
                    capacity,
                });
            }
        }

        let u = self.add_node(from);
        let v = self.add_node(to);
        self.lookup.insert((u, v), self.edges.len());
        self.edges.push(Edge {
            from: u,
            to: v,
            capacity,
        });
        Ok(())
    }

    /// Node labels in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.labels.iter()
    }

    /// `(from, to, capacity)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, Capacity)> + '_ {
        self.edges
            .iter()
            .map(move |e| (&self.labels[e.from.0], &self.labels[e.to.0], e.capacity))
    }

    /// Edges over interned ids, in insertion order
    pub fn raw_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_id(&self, label: &N) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Label for an interned id
    ///
    /// # Panics
    /// Panics if `id` was not produced by this graph.
    pub fn label(&self, id: NodeId) -> &N {
        &self.labels[id.0]
    }

    pub fn contains_node(&self, label: &N) -> bool {
        self.index.contains_key(label)
    }

    /// Capacity of the edge `from -> to`, if defined
    pub fn capacity(&self, from: &N, to: &N) -> Option<Capacity> {
        let u = self.node_id(from)?;
        let v = self.node_id(to)?;
        self.capacity_by_id(u, v)
    }

    pub fn capacity_by_id(&self, from: NodeId, to: NodeId) -> Option<Capacity> {
        self.lookup
            .get(&(from, to))
            .map(|&position| self.edges[position].capacity)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolves a label or reports it as unknown
    pub(crate) fn require_node(&self, label: &N) -> Result<NodeId, FlowError> {
        self.node_id(label)
            .ok_or_else(|| FlowError::UnknownNode(format!("{:?}", label)))
    }
}

impl<N: Label> From<CapacitatedGraph<N>> for EdgeListRecord<N> {
    fn from(graph: CapacitatedGraph<N>) -> Self {
        let edges = graph
            .edges()
            .map(|(from, to, capacity)| (from.clone(), to.clone(), capacity))
            .collect();
        Self {
            nodes: graph.labels,
            edges,
        }
    }
}

impl<N: Label> TryFrom<EdgeListRecord<N>> for CapacitatedGraph<N> {
    type Error = FlowError;

    fn try_from(record: EdgeListRecord<N>) -> Result<Self, Self::Error> {
        let mut graph = Self::new();
        for label in record.nodes {
            graph.add_node(label);
        }
        for (from, to, capacity) in record.edges {
            graph.add_edge(from, to, capacity)?;
        }
        Ok(graph)
    }
}
