//! Graph storage and read-only views
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod snapshot;

pub use self::graph::{CapacitatedGraph, Edge, EdgeListRecord, Label};
pub use self::snapshot::{FlowSnapshot, SnapshotEdge};
