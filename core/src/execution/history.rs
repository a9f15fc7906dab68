//! Augmentation history for flow computations
//!
//! Records each augmenting path with its bottleneck and the running flow
//! total, so a renderer or a teaching front end can replay how the
//! maximum flow was reached.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::Capacity;

/// Metadata for a recorded run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Algorithm name
    pub algorithm_name: String,

    /// Algorithm parameters
    pub parameters: HashMap<String, String>,

    /// Total number of augmentation steps
    pub step_count: usize,
}

/// One applied augmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationStep<N> {
    /// Zero-based position in the run
    pub index: usize,

    /// Nodes from source to sink
    pub path: Vec<N>,

    /// Amount pushed along the path
    pub bottleneck: Capacity,

    /// Flow value after this step
    pub total_flow: Capacity,
}

/// Ordered record of augmentations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentationHistory<N> {
    pub metadata: ExecutionMetadata,
    steps: Vec<AugmentationStep<N>>,
}

impl<N: PartialEq> AugmentationHistory<N> {
    pub fn new(algorithm_name: &str, parameters: HashMap<String, String>) -> Self {
        Self {
            metadata: ExecutionMetadata {
                algorithm_name: algorithm_name.to_string(),
                parameters,
                step_count: 0,
            },
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, path: Vec<N>, bottleneck: Capacity, total_flow: Capacity) {
        let index = self.steps.len();
        self.steps.push(AugmentationStep {
            index,
            path,
            bottleneck,
            total_flow,
        });
        self.metadata.step_count = self.steps.len();
    }

    pub fn steps(&self) -> &[AugmentationStep<N>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all bottlenecks
    pub fn total_pushed(&self) -> Capacity {
        self.steps.iter().map(|step| step.bottleneck).sum()
    }

    /// Indices of steps whose path passes through `node`
    pub fn steps_through(&self, node: &N) -> Vec<usize> {
        self.steps
            .iter()
            .filter(|step| step.path.contains(node))
            .map(|step| step.index)
            .collect()
    }

    /// Path lengths in arcs, in execution order
    pub fn path_lengths(&self) -> Vec<usize> {
        self.steps
            .iter()
            .map(|step| step.path.len().saturating_sub(1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording() {
        let mut history = AugmentationHistory::new("Edmonds-Karp", HashMap::new());
        assert!(history.is_empty());

        history.record(vec!["s", "a", "t"], 3, 3);
        history.record(vec!["s", "b", "a", "t"], 2, 5);

        assert_eq!(history.len(), 2);
        assert_eq!(history.metadata.step_count, 2);
        assert_eq!(history.total_pushed(), 5);
        assert_eq!(history.steps()[1].index, 1);
        assert_eq!(history.steps_through(&"b"), vec![1]);
        assert_eq!(history.steps_through(&"a"), vec![0, 1]);
        assert_eq!(history.path_lengths(), vec![2, 3]);
    }
}
