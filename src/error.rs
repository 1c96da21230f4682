use thiserror::Error;

use crate::body::BodyId;

/// Failures surfaced by the simulation engine.
///
/// None of these are retried internally; a failing call leaves the engine
/// state exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("bodies {first} and {second} occupy the same point")]
    DegenerateGeometry { first: BodyId, second: BodyId },

    #[error(
        "step size search did not converge after {iterations} iterations (dt = {dt}, max travel = {max_travel})"
    )]
    StepConvergence {
        iterations: u32,
        dt: f64,
        max_travel: f64,
    },

    #[error("invalid body: {0}")]
    InvalidBody(&'static str),

    #[error("invalid time step {0}")]
    InvalidStep(f64),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
