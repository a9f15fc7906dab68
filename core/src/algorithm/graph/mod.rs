//! Residual-network maximum flow and minimum cut
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod residual;
pub mod augmenting_path;
pub mod max_flow;
pub mod min_cut;

pub use self::residual::ResidualNetwork;
pub use self::augmenting_path::{find_augmenting_path, AugmentingPath, PathFinder};
pub use self::max_flow::{
    compute_max_flow, EdgeFlow, FlowComputation, FlowMetrics, FlowStatus, MaxFlow, MaxFlowSolver,
};
pub use self::min_cut::{compute_min_cut, extract_min_cut, CutEdge, MinCut};
