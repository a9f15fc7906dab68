//! Execution records
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod history;

pub use self::history::{AugmentationHistory, AugmentationStep, ExecutionMetadata};
