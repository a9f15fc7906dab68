//! Maximum flow via shortest augmenting paths
//!
//! This module implements the Edmonds–Karp method on an explicit residual
//! network. Each round asks the path finder for a shortest path of
//! positive residual capacity, pushes its bottleneck along every arc and
//! adds it to the running total. When no path remains, the per-edge flow
//! assignment is read back from residual consumption.
//!
//! A computation owns its residual network exclusively and only borrows
//! the graph, so independent computations may share one graph.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::config::SolverConfig;
use crate::algorithm::graph::augmenting_path::{AugmentingPath, PathFinder};
use crate::algorithm::graph::min_cut::{extract_min_cut, MinCut};
use crate::algorithm::graph::residual::ResidualNetwork;
use crate::algorithm::state::ComputationPhase;
use crate::algorithm::traits::{
    Algorithm, AlgorithmParameter, Capacity, FlowError, NodeId, ParameterType,
};
use crate::data_structures::graph::{CapacitatedGraph, Edge, Label};
use crate::execution::history::AugmentationHistory;

const ALGORITHM_NAME: &str = "Edmonds-Karp";

/// Whether a run proved its flow maximal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    /// No augmenting path remains
    Optimal,
    /// A deadline or augmentation budget stopped the run early
    Incomplete,
}

/// Flow carried by one original edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow<N> {
    pub from: N,
    pub to: N,
    pub capacity: Capacity,
    pub flow: Capacity,
}

impl<N> EdgeFlow<N> {
    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Nodes dequeued across all path searches
    pub nodes_visited: usize,
    /// Algorithm execution time
    pub execution_time_ms: f64,
}

/// Maximum flow value with its per-edge assignment
#[derive(Debug, Clone, Serialize)]
pub struct MaxFlow<N> {
    /// Flow value leaving the source
    pub total_flow: Capacity,
    pub status: FlowStatus,
    /// Assignment in edge insertion order
    pub edges: Vec<EdgeFlow<N>>,
    pub metrics: FlowMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<AugmentationHistory<N>>,
    #[serde(skip)]
    index: HashMap<(N, N), usize>,
}

impl<N: Label> MaxFlow<N> {
    fn new(
        total_flow: Capacity,
        status: FlowStatus,
        edges: Vec<EdgeFlow<N>>,
        metrics: FlowMetrics,
        history: Option<AugmentationHistory<N>>,
    ) -> Self {
        let index = edges
            .iter()
            .enumerate()
            .map(|(position, e)| ((e.from.clone(), e.to.clone()), position))
            .collect();
        Self {
            total_flow,
            status,
            edges,
            metrics,
            history,
            index,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == FlowStatus::Optimal
    }

    /// Flow on the original edge `from -> to`, if that edge exists
    pub fn flow(&self, from: &N, to: &N) -> Option<Capacity> {
        self.index
            .get(&(from.clone(), to.clone()))
            .map(|&position| self.edges[position].flow)
    }

    /// Flow assignment keyed by `(from, to)`
    pub fn flow_map(&self) -> HashMap<(N, N), Capacity> {
        self.edges
            .iter()
            .map(|e| ((e.from.clone(), e.to.clone()), e.flow))
            .collect()
    }

    /// Outgoing minus incoming flow at `node`
    pub fn net_outflow(&self, node: &N) -> Capacity {
        self.edges.iter().fold(0, |net, e| {
            let out = if &e.from == node { e.flow } else { 0 };
            let inc = if &e.to == node { e.flow } else { 0 };
            net + out - inc
        })
    }

    /// Graph with the same edges whose capacities are the assigned flows
    ///
    /// Nodes without incident edges are not carried over.
    pub fn flow_graph(&self) -> Result<CapacitatedGraph<N>, FlowError> {
        CapacitatedGraph::from_edges(
            self.edges
                .iter()
                .map(|e| (e.from.clone(), e.to.clone(), e.flow)),
        )
    }
}

/// Total capacity of the selected edges, `None` if it overflows
fn boundary_capacity<N: Label>(
    graph: &CapacitatedGraph<N>,
    selected: impl Fn(&Edge) -> bool,
) -> Option<Capacity> {
    graph
        .raw_edges()
        .iter()
        .filter(|e| selected(e))
        .try_fold(0, |total: Capacity, e| total.checked_add(e.capacity))
}

/// One max-flow computation over a borrowed graph
#[derive(Debug)]
pub struct FlowComputation<'g, N> {
    graph: &'g CapacitatedGraph<N>,
    source: NodeId,
    sink: NodeId,
    residual: ResidualNetwork,
    finder: PathFinder,
    phase: ComputationPhase,
    status: FlowStatus,
    total_flow: Capacity,
    augmentations: usize,
    history: Option<AugmentationHistory<N>>,
    config: SolverConfig,
    started: Instant,
    elapsed_ms: f64,
}

impl<'g, N: Label> FlowComputation<'g, N> {
    /// Validates endpoints and builds the residual network
    pub fn new(
        graph: &'g CapacitatedGraph<N>,
        source: &N,
        sink: &N,
        config: SolverConfig,
    ) -> Result<Self, FlowError> {
        let source_id = graph.require_node(source)?;
        let sink_id = graph.require_node(sink)?;
        if source_id == sink_id {
            return Err(FlowError::SourceIsSink(format!("{:?}", source)));
        }
        if boundary_capacity(graph, |e| e.from == source_id && e.to != source_id).is_none()
            && boundary_capacity(graph, |e| e.to == sink_id && e.from != sink_id).is_none()
        {
            return Err(FlowError::CapacityOverflow(format!(
                "capacity out of {:?} and into {:?} both exceed {}",
                source,
                sink,
                Capacity::MAX
            )));
        }

        let residual = ResidualNetwork::initialize(graph);
        let finder = PathFinder::new(residual.vertex_count());
        let history = config
            .record_history
            .then(|| AugmentationHistory::new(ALGORITHM_NAME, parameter_values(&config)));

        Ok(Self {
            graph,
            source: source_id,
            sink: sink_id,
            residual,
            finder,
            phase: ComputationPhase::Initialized,
            status: FlowStatus::Optimal,
            total_flow: 0,
            augmentations: 0,
            history,
            config,
            started: Instant::now(),
            elapsed_ms: 0.0,
        })
    }

    pub fn phase(&self) -> ComputationPhase {
        self.phase
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn total_flow(&self) -> Capacity {
        self.total_flow
    }

    pub fn residual(&self) -> &ResidualNetwork {
        &self.residual
    }

    fn advance(&mut self, next: ComputationPhase) -> Result<(), FlowError> {
        self.phase = self.phase.transition(next)?;
        Ok(())
    }

    fn terminate(&mut self, status: FlowStatus) -> Result<(), FlowError> {
        self.advance(ComputationPhase::Terminated)?;
        self.status = status;
        self.elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;

        match status {
            FlowStatus::Optimal => info!(
                "{} finished: max flow {} after {} augmentations",
                ALGORITHM_NAME, self.total_flow, self.augmentations
            ),
            FlowStatus::Incomplete => warn!(
                "{} stopped early: flow {} after {} augmentations",
                ALGORITHM_NAME, self.total_flow, self.augmentations
            ),
        }
        Ok(())
    }

    fn budget_exhausted(&self) -> bool {
        if let Some(limit) = self.config.max_augmentations {
            if self.augmentations >= limit {
                return true;
            }
        }
        if let Some(deadline) = self.config.deadline {
            if self.started.elapsed() >= deadline {
                return true;
            }
        }
        false
    }

    fn next_path(&mut self) -> Result<Option<AugmentingPath>, FlowError> {
        self.finder.find(&self.residual, self.source, self.sink)
    }

    fn apply(&mut self, path: AugmentingPath) -> Result<(), FlowError> {
        let bottleneck = path.bottleneck(&self.residual);
        if bottleneck <= 0 {
            error!("Augmenting path with non-positive bottleneck {}", bottleneck);
            return Err(FlowError::InvariantViolation(format!(
                "augmenting path bottleneck {} is not positive",
                bottleneck
            )));
        }

        for (u, v) in path.arcs() {
            if let Err(e) = self.residual.push(u, v, bottleneck) {
                error!("Aborting flow computation: {}", e);
                return Err(e);
            }
        }

        self.total_flow = self.total_flow.checked_add(bottleneck).ok_or_else(|| {
            FlowError::InvariantViolation("total flow overflowed".to_string())
        })?;
        self.augmentations += 1;

        debug!(
            "Augmentation {}: {} arcs, bottleneck {}, total {}",
            self.augmentations,
            path.len(),
            bottleneck,
            self.total_flow
        );

        let graph = self.graph;
        if let Some(history) = self.history.as_mut() {
            let labels = path.nodes().iter().map(|&n| graph.label(n).clone()).collect();
            history.record(labels, bottleneck, self.total_flow);
        }
        Ok(())
    }

    /// Performs a single augmentation
    ///
    /// Returns `false` once no augmenting path remains, at which point the
    /// computation has terminated with an optimal flow. Budget limits are
    /// only enforced by [`run`](Self::run).
    pub fn augment(&mut self) -> Result<bool, FlowError> {
        self.advance(ComputationPhase::Augmenting)?;
        match self.next_path()? {
            Some(path) => {
                self.apply(path)?;
                Ok(true)
            }
            None => {
                self.terminate(FlowStatus::Optimal)?;
                Ok(false)
            }
        }
    }

    /// Augments until no path remains or the configured budget runs out
    pub fn run(&mut self) -> Result<FlowStatus, FlowError> {
        self.advance(ComputationPhase::Augmenting)?;
        loop {
            let Some(path) = self.next_path()? else {
                self.terminate(FlowStatus::Optimal)?;
                break;
            };
            if self.budget_exhausted() {
                self.terminate(FlowStatus::Incomplete)?;
                break;
            }
            self.apply(path)?;
            self.advance(ComputationPhase::Augmenting)?;
        }
        Ok(self.status)
    }

    /// Per-edge flow derived from residual consumption
    ///
    /// `flow(u, v) = clamp(c - r(u, v), 0, c)`: flow cancelled by pushes in
    /// the opposite direction shows up as residual above `c`.
    fn flow_assignment(&self) -> Vec<EdgeFlow<N>> {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| {
                let remaining = self.residual.residual_capacity(edge.from, edge.to);
                EdgeFlow {
                    from: self.graph.label(edge.from).clone(),
                    to: self.graph.label(edge.to).clone(),
                    capacity: edge.capacity,
                    flow: (edge.capacity - remaining).clamp(0, edge.capacity),
                }
            })
            .collect()
    }

    /// Result of a terminated computation
    pub fn max_flow(&self) -> Result<MaxFlow<N>, FlowError> {
        if !self.phase.is_terminal() {
            return Err(FlowError::InvalidTransition {
                from: self.phase.to_string(),
                to: ComputationPhase::Terminated.to_string(),
            });
        }

        let edges = self.flow_assignment();
        let source_label = self.graph.label(self.source);
        let net = edges.iter().fold(0, |net, e| {
            let out = if &e.from == source_label { e.flow } else { 0 };
            let inc = if &e.to == source_label { e.flow } else { 0 };
            net + out - inc
        });
        if net != self.total_flow {
            error!(
                "Derived source outflow {} differs from accumulated flow {}",
                net, self.total_flow
            );
            return Err(FlowError::InvariantViolation(format!(
                "source outflow {} != accumulated flow {}",
                net, self.total_flow
            )));
        }

        let metrics = FlowMetrics {
            augmentations: self.augmentations,
            nodes_visited: self.finder.nodes_visited(),
            execution_time_ms: self.elapsed_ms,
        };
        Ok(MaxFlow::new(
            self.total_flow,
            self.status,
            edges,
            metrics,
            self.history.clone(),
        ))
    }

    /// Extracts the minimum cut from the final residual network
    ///
    /// Requires an optimal termination; a run cut short by its budget has
    /// no final residual network to read a cut from.
    pub fn extract_cut(&mut self) -> Result<MinCut<N>, FlowError> {
        if self.phase == ComputationPhase::Terminated && self.status == FlowStatus::Incomplete {
            return Err(FlowError::InvalidTransition {
                from: format!("{} (incomplete)", self.phase),
                to: ComputationPhase::CutExtracted.to_string(),
            });
        }
        self.advance(ComputationPhase::CutExtracted)?;
        extract_min_cut(self.graph, &self.residual, self.source)
    }
}

/// String parameters of a configuration, for history metadata
fn parameter_values(config: &SolverConfig) -> HashMap<String, String> {
    ["deadline_ms", "max_augmentations", "record_history"]
        .iter()
        .filter_map(|&name| config.get_parameter(name).map(|v| (name.to_string(), v)))
        .collect()
}

/// Configurable Edmonds–Karp solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: SolverConfig,
}

impl MaxFlowSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Maximum flow from `source` to `sink`
    pub fn solve<N: Label>(
        &self,
        graph: &CapacitatedGraph<N>,
        source: &N,
        sink: &N,
    ) -> Result<MaxFlow<N>, FlowError> {
        let mut computation = FlowComputation::new(graph, source, sink, self.config.clone())?;
        computation.run()?;
        computation.max_flow()
    }

    /// Maximum flow together with its minimum cut
    ///
    /// Fails with `InvalidTransition` if the configured budget prevented an
    /// optimal termination.
    pub fn solve_with_cut<N: Label>(
        &self,
        graph: &CapacitatedGraph<N>,
        source: &N,
        sink: &N,
    ) -> Result<(MaxFlow<N>, MinCut<N>), FlowError> {
        let mut computation = FlowComputation::new(graph, source, sink, self.config.clone())?;
        computation.run()?;
        let flow = computation.max_flow()?;
        let cut = computation.extract_cut()?;
        Ok((flow, cut))
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        ALGORITHM_NAME
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> &'static str {
        "Maximum flow by shortest augmenting paths on an explicit residual network, O(V·E²), \
         with min-cut extraction from final residual reachability."
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter {
                name: "deadline_ms".to_string(),
                value: self.config.get_parameter("deadline_ms"),
                value_type: ParameterType::Duration,
                description: "Wall-clock budget; an expired run reports Incomplete".to_string(),
            },
            AlgorithmParameter {
                name: "max_augmentations".to_string(),
                value: self.config.get_parameter("max_augmentations"),
                value_type: ParameterType::Integer,
                description: "Upper bound on applied augmenting paths".to_string(),
            },
            AlgorithmParameter {
                name: "record_history".to_string(),
                value: self.config.get_parameter("record_history"),
                value_type: ParameterType::Boolean,
                description: "Record each augmenting path and bottleneck".to_string(),
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        self.config.set_parameter(name, value)
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.config.get_parameter(name)
    }
}

/// Maximum flow with the default (unbounded) configuration
pub fn compute_max_flow<N: Label>(
    graph: &CapacitatedGraph<N>,
    source: &N,
    sink: &N,
) -> Result<MaxFlow<N>, FlowError> {
    MaxFlowSolver::default().solve(graph, source, sink)
}
