//! Error types for superheat simulation.

use et_engine::EngineError;
use thiserror::Error;

/// Errors surfaced while setting up a superheat run or sweep.
///
/// The loop itself never fails: a validated model and profile keep every
/// per-step operation infallible, so errors only appear up front.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid model or profile: {0}")]
    InvalidProfile(#[from] EngineError),

    #[error("Invalid sweep: {what}")]
    InvalidSweep { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;
