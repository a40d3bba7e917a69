//! Out step engine
//!
//! Two-phase pattern:
//! 1. Plan - decide which steps run from the request (pure, testable)
//! 2. Execute - perform the remote calls in order (effectful)

mod execute;
mod plan;

pub use execute::{OutOutcome, execute_out};
pub use plan::{OutPlan, OutStep, create_out_plan};
