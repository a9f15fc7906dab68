//! Parallel solving of independent flow problems
//!
//! Augmentations within one computation are strictly sequential, since
//! each depends on the residual state left by the previous one. Separate
//! problems share no mutable state, so they are distributed over the
//! rayon pool, each with its own residual network.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use rayon::prelude::*;

use crate::algorithm::config::SolverConfig;
use crate::algorithm::graph::max_flow::{MaxFlow, MaxFlowSolver};
use crate::algorithm::graph::min_cut::MinCut;
use crate::algorithm::traits::FlowError;
use crate::data_structures::graph::{CapacitatedGraph, Label};

/// Source/sink query against a shared read-only graph
#[derive(Debug, Clone)]
pub struct FlowProblem<'g, N> {
    pub graph: &'g CapacitatedGraph<N>,
    pub source: N,
    pub sink: N,
}

impl<'g, N> FlowProblem<'g, N> {
    pub fn new(graph: &'g CapacitatedGraph<N>, source: N, sink: N) -> Self {
        Self {
            graph,
            source,
            sink,
        }
    }
}

/// Solves every problem in parallel; results keep input order
pub fn solve_batch<N>(
    problems: &[FlowProblem<'_, N>],
    config: &SolverConfig,
) -> Vec<Result<MaxFlow<N>, FlowError>>
where
    N: Label + Send + Sync,
{
    debug!("Solving {} flow problems in parallel", problems.len());
    let solver = MaxFlowSolver::new(config.clone());
    problems
        .par_iter()
        .map(|problem| solver.solve(problem.graph, &problem.source, &problem.sink))
        .collect()
}

/// Like [`solve_batch`], also extracting each minimum cut
pub fn solve_batch_with_cuts<N>(
    problems: &[FlowProblem<'_, N>],
    config: &SolverConfig,
) -> Vec<Result<(MaxFlow<N>, MinCut<N>), FlowError>>
where
    N: Label + Send + Sync,
{
    let solver = MaxFlowSolver::new(config.clone());
    problems
        .par_iter()
        .map(|problem| solver.solve_with_cut(problem.graph, &problem.source, &problem.sink))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::compute_max_flow;

    #[test]
    fn test_batch_matches_sequential() {
        let graph = CapacitatedGraph::from_edges(vec![
            (0, 1, 4),
            (0, 2, 3),
            (1, 3, 2),
            (2, 3, 5),
            (1, 2, 1),
        ])
        .unwrap();

        let problems = vec![
            FlowProblem::new(&graph, 0, 3),
            FlowProblem::new(&graph, 1, 3),
            FlowProblem::new(&graph, 0, 9),
            FlowProblem::new(&graph, 2, 2),
        ];
        let results = solve_batch(&problems, &SolverConfig::default());

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].as_ref().unwrap().total_flow,
            compute_max_flow(&graph, &0, &3).unwrap().total_flow
        );
        assert_eq!(results[1].as_ref().unwrap().total_flow, 3);
        assert!(matches!(results[2], Err(FlowError::UnknownNode(_))));
        assert!(matches!(results[3], Err(FlowError::SourceIsSink(_))));
    }

    #[test]
    fn test_batch_cuts_agree_with_flows() {
        let graph =
            CapacitatedGraph::from_edges(vec![("a", "b", 2), ("b", "c", 1), ("a", "c", 4)])
                .unwrap();
        let problems = vec![FlowProblem::new(&graph, "a", "c"), FlowProblem::new(&graph, "a", "b")];

        for result in solve_batch_with_cuts(&problems, &SolverConfig::default()) {
            let (flow, cut) = result.unwrap();
            assert_eq!(flow.total_flow, cut.cut_value);
        }
    }
}
