//! Batch execution across independent problems
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod parallel;

pub use self::parallel::{solve_batch, solve_batch_with_cuts, FlowProblem};
