//! Engine model layer for enginetherm.
//!
//! Provides:
//! - Lumped engine thermal/kinematic model with validated construction
//! - Ambient temperature screening with 0 °C fallback
//! - Piecewise-linear torque/speed operating profile

pub mod ambient;
pub mod engine;
pub mod error;
pub mod profile;

// Re-exports for public API
pub use ambient::{AMBIENT_FALLBACK_C, AMBIENT_MAX_C, AMBIENT_MIN_C, AmbientScreen};
pub use engine::EngineModel;
pub use error::{EngineError, EngineResult};
pub use profile::{Segment, TorqueProfile};
