//! Core algorithm trait definitions for the flow engine
//!
//! This module establishes the shared vocabulary of the crate: the dense
//! node identifier used by every internal structure, the error taxonomy
//! of flow computations, and the parameterised `Algorithm` interface
//! implemented by solvers.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense node identifier assigned in first-insertion order
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capacity and flow quantity. Signed so that negative input is rejected
/// rather than unrepresentable.
pub type Capacity = i64;

/// Error taxonomy for graph construction and flow computation
///
/// Node labels are rendered with their `Debug` form so the error type
/// stays independent of the label type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid capacity {capacity} on edge {from} -> {to}")]
    InvalidCapacity {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Conflicting duplicate edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Source and sink are the same node: {0}")]
    SourceIsSink(String),

    /// Engine bug; never reachable through the public API.
    #[error(
        "Insufficient residual capacity on {from} -> {to}: \
         requested {requested}, available {available}"
    )]
    InsufficientResidual {
        from: NodeId,
        to: NodeId,
        requested: Capacity,
        available: Capacity,
    },

    /// The flow value between the endpoints may exceed `Capacity::MAX`.
    #[error("Flow value not representable: {0}")]
    CapacityOverflow(String),

    #[error("Source {0} is not reachable from itself")]
    Disconnected(String),

    #[error("Invalid computation transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Flow invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlowError {
    /// Whether the error signals a defect in the engine rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FlowError::InsufficientResidual { .. }
                | FlowError::InvariantViolation(_)
                | FlowError::Disconnected(_)
        )
    }
}

/// Parameter type enumeration for string-configured algorithms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Boolean,
    /// Milliseconds
    Duration,
}

/// Algorithm parameter description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: Option<String>,
    pub value_type: ParameterType,
    pub description: String,
}

/// Common interface for configurable graph algorithms
pub trait Algorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> &'static str;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// All parameters that currently carry a value
    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters()
            .into_iter()
            .filter_map(|p| p.value.map(|v| (p.name, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FlowError::DuplicateEdge {
            from: "\"a\"".into(),
            to: "\"b\"".into(),
        };
        assert_eq!(err.to_string(), "Conflicting duplicate edge \"a\" -> \"b\"");

        let err = FlowError::InsufficientResidual {
            from: NodeId(0),
            to: NodeId(3),
            requested: 5,
            available: 2,
        };
        assert!(err.to_string().contains("#0 -> #3"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_input_errors_are_not_fatal() {
        assert!(!FlowError::UnknownNode("x".into()).is_fatal());
        assert!(!FlowError::InvalidCapacity {
            from: "a".into(),
            to: "b".into(),
            capacity: -1
        }
        .is_fatal());
    }
}
