//! Maximum flow and minimum cut on capacitated directed graphs
//!
//! The crate owns the whole algorithm: a capacitated graph model, a
//! residual network with paired reverse arcs, breadth-first augmenting
//! path search (Edmonds–Karp), a max-flow engine that derives a per-edge
//! flow assignment, and a min-cut extractor that reads the final residual
//! network.
//!
//! ```
//! use maxflow_core::{compute_max_flow, compute_min_cut, CapacitatedGraph};
//!
//! let graph = CapacitatedGraph::from_edges(vec![("s", "a", 3), ("a", "t", 2), ("s", "t", 1)])?;
//! let flow = compute_max_flow(&graph, &"s", &"t")?;
//! let cut = compute_min_cut(&graph, &"s", &"t")?;
//! assert_eq!(flow.total_flow, 3);
//! assert_eq!(cut.cut_value, flow.total_flow);
//! # Ok::<(), maxflow_core::FlowError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod execution;
pub mod optimization;

pub use crate::algorithm::{
    compute_max_flow, compute_min_cut, Algorithm, Capacity, ComputationPhase, CutEdge, EdgeFlow,
    FlowComputation, FlowError, FlowMetrics, FlowStatus, MaxFlow, MaxFlowSolver, MinCut, NodeId,
    SolverConfig,
};
pub use crate::data_structures::{CapacitatedGraph, FlowSnapshot, Label};
pub use crate::execution::AugmentationHistory;
pub use crate::optimization::{solve_batch, solve_batch_with_cuts, FlowProblem};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
