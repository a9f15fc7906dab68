//! Lifecycle of a single flow computation
//!
//! `Initialized → Augmenting (loop) → Terminated → CutExtracted`
//!
//! No transition skips a state and no state is re-entered once left,
//! apart from the augmentation self-loop.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::FlowError;

/// Phase of a flow computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputationPhase {
    /// Residual network built, no flow pushed yet
    Initialized,
    /// Augmenting paths are being searched and applied
    Augmenting,
    /// No further augmentation will happen
    Terminated,
    /// Cut derived from the final residual network
    CutExtracted,
}

impl ComputationPhase {
    pub fn can_transition_to(self, next: ComputationPhase) -> bool {
        use ComputationPhase::*;
        matches!(
            (self, next),
            (Initialized, Augmenting)
                | (Augmenting, Augmenting)
                | (Augmenting, Terminated)
                | (Terminated, CutExtracted)
        )
    }

    /// Validated transition
    pub fn transition(self, next: ComputationPhase) -> Result<ComputationPhase, FlowError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(FlowError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Whether augmentation has finished
    pub fn is_terminal(self) -> bool {
        matches!(self, ComputationPhase::Terminated | ComputationPhase::CutExtracted)
    }
}

impl fmt::Display for ComputationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComputationPhase::Initialized => "Initialized",
            ComputationPhase::Augmenting => "Augmenting",
            ComputationPhase::Terminated => "Terminated",
            ComputationPhase::CutExtracted => "CutExtracted",
        };
        f.write_str(name)
    }
}
