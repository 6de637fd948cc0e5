//! Superheat simulation for enginetherm.
//!
//! Provides:
//! - Fixed-step thermal/kinematic superheat loop
//! - Run options, outcome and report types, decimated step traces
//! - Legacy integer-channel entry point (`superheat_time`)
//! - Parallel ambient temperature sweeps

pub mod error;
pub mod sim;
pub mod sweep;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use sim::{
    Outcome, RunTrace, SimOptions, StepSnapshot, SuperheatReport, run_superheat, superheat_time,
};
pub use sweep::{AmbientSweep, SweepPoint, run_ambient_sweep};
