//! Read-only graph and flow snapshot for renderers
//!
//! A snapshot carries exactly what a drawing layer needs: the node list and
//! every edge with its capacity and, once a flow has been computed, the
//! flow it carries. Snapshots own their data and never alias the graph.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::{FlowStatus, MaxFlow};
use crate::algorithm::traits::{Capacity, FlowError};
use crate::data_structures::graph::{CapacitatedGraph, Label};

/// Edge as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEdge<N> {
    pub from: N,
    pub to: N,
    pub capacity: Capacity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<Capacity>,
}

/// Immutable view of a graph and, optionally, a flow over it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSnapshot<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<SnapshotEdge<N>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_flow: Option<Capacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FlowStatus>,
}

impl<N: Serialize> FlowSnapshot<N> {
    pub fn to_json(&self) -> Result<String, FlowError> {
        serde_json::to_string(self).map_err(|e| FlowError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, FlowError> {
        serde_json::to_string_pretty(self).map_err(|e| FlowError::Serialization(e.to_string()))
    }
}

impl<N: Label> CapacitatedGraph<N> {
    /// Snapshot of capacities only
    pub fn snapshot(&self) -> FlowSnapshot<N> {
        FlowSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self
                .edges()
                .map(|(from, to, capacity)| SnapshotEdge {
                    from: from.clone(),
                    to: to.clone(),
                    capacity,
                    flow: None,
                })
                .collect(),
            total_flow: None,
            status: None,
        }
    }
}

impl<N: Label> MaxFlow<N> {
    /// Snapshot of `graph` annotated with this flow
    pub fn snapshot(&self, graph: &CapacitatedGraph<N>) -> FlowSnapshot<N> {
        let mut snapshot = graph.snapshot();
        for edge in snapshot.edges.iter_mut() {
            edge.flow = self.flow(&edge.from, &edge.to);
        }
        snapshot.total_flow = Some(self.total_flow);
        snapshot.status = Some(self.status);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::compute_max_flow;

    #[test]
    fn test_capacity_snapshot() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "a", 3), ("a", "t", 2)]).unwrap();
        let snapshot = graph.snapshot();

        assert_eq!(snapshot.nodes, vec!["s", "a", "t"]);
        assert_eq!(snapshot.edges.len(), 2);
        assert!(snapshot.edges.iter().all(|e| e.flow.is_none()));

        let json = snapshot.to_json().unwrap();
        assert!(!json.contains("flow"));
    }

    #[test]
    fn test_flow_snapshot_json() {
        let graph = CapacitatedGraph::from_edges(vec![("s", "a", 3), ("a", "t", 2)]).unwrap();
        let result = compute_max_flow(&graph, &"s", &"t").unwrap();
        let snapshot = result.snapshot(&graph);

        assert_eq!(snapshot.total_flow, Some(2));
        assert_eq!(snapshot.edges[0].flow, Some(2));

        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "Optimal");
        assert_eq!(value["edges"][1]["flow"], 2);
        assert_eq!(value["edges"][1]["capacity"], 2);
    }
}
