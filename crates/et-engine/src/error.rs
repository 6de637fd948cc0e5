//! Error types for engine model and profile construction.

use thiserror::Error;

/// Errors detected while building an engine model or torque profile.
///
/// Every failure here surfaces at construction time; a built model and
/// profile never fail mid-simulation.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error("Moment of inertia must be positive and finite, got {inertia}")]
    ZeroInertia { inertia: f64 },

    #[error("Non-finite value for {what}: {value}")]
    NonFiniteCoefficient { what: &'static str, value: f64 },

    #[error("Breakpoint lists differ in length: {torque_len} torque vs {velocity_len} velocity")]
    MismatchedBreakpoints {
        torque_len: usize,
        velocity_len: usize,
    },

    #[error("Profile needs at least 2 breakpoints, got {len}")]
    TooFewBreakpoints { len: usize },

    #[error("Non-finite {what} breakpoint at index {index}")]
    NonFiniteBreakpoint { what: &'static str, index: usize },

    #[error("Zero-width profile segment at breakpoint {index}")]
    DegenerateSegment { index: usize },

    #[error("Velocity breakpoints not strictly increasing at index {index}")]
    UnorderedBreakpoints { index: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::ZeroInertia { inertia: -1.0 };
        assert!(err.to_string().contains("-1"));
    }
}
