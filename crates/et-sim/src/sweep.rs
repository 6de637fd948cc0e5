//! Parallel ambient temperature sweeps.
//!
//! Runs the same engine and profile across a uniform grid of requested
//! ambient temperatures. The model coefficients and the profile are shared
//! read-only across worker threads; each run owns its own state, so results
//! do not depend on scheduling.

use crate::error::{SimError, SimResult};
use crate::sim::{SimOptions, SuperheatReport, run_superheat};
use et_core::ensure_finite;
use et_engine::{EngineModel, TorqueProfile};
use rayon::prelude::*;

/// Definition of a uniform ambient temperature sweep.
///
/// Bounds are not screened here: each run screens its own grid point, so an
/// out-of-range point simply falls back to 0 °C like any other requested
/// ambient.
#[derive(Clone, Copy, Debug)]
pub struct AmbientSweep {
    /// First grid point (°C)
    pub start_c: f64,
    /// Last grid point (°C), produced exactly
    pub end_c: f64,
    /// Number of grid points, at least 2
    pub points: usize,
}

impl AmbientSweep {
    /// Create a sweep definition.
    ///
    /// # Errors
    /// Rejects non-finite bounds, (nearly) equal bounds, and fewer than
    /// 2 points.
    pub fn new(start_c: f64, end_c: f64, points: usize) -> SimResult<Self> {
        let sweep = Self {
            start_c,
            end_c,
            points,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    /// Check the sweep definition.
    ///
    /// The fields are public, so a definition does not have to come from
    /// [`AmbientSweep::new`]; [`run_ambient_sweep`] checks again on entry.
    pub fn validate(&self) -> SimResult<()> {
        check_finite(self.start_c, "sweep start temperature must be finite")?;
        check_finite(self.end_c, "sweep end temperature must be finite")?;

        if self.points < 2 {
            return Err(SimError::InvalidSweep {
                what: "sweep must have at least 2 points",
            });
        }
        if (self.start_c - self.end_c).abs() < 1e-12 {
            return Err(SimError::InvalidSweep {
                what: "sweep start and end must be different",
            });
        }
        Ok(())
    }

    /// Generate the uniformly spaced grid.
    pub fn generate_points(&self) -> Vec<f64> {
        if self.points <= 1 {
            return vec![self.start_c];
        }

        let mut points = Vec::with_capacity(self.points);
        let delta = (self.end_c - self.start_c) / (self.points - 1) as f64;

        for i in 0..self.points {
            points.push(self.start_c + i as f64 * delta);
        }

        // Ensure exact endpoint
        points[self.points - 1] = self.end_c;
        points
    }
}

/// Ensure a sweep bound is finite, mapping the failure into a sweep error.
fn check_finite(value: f64, what: &'static str) -> SimResult<()> {
    ensure_finite(value, what).map_err(|_| SimError::InvalidSweep { what })?;
    Ok(())
}

/// Result of one sweep grid point.
#[derive(Clone, Debug)]
pub struct SweepPoint {
    /// Ambient requested for this grid point (°C)
    pub requested_c: f64,
    /// Ambient the run actually used after screening (°C)
    pub ambient_c: f64,
    pub report: SuperheatReport,
}

/// Run one superheat simulation per sweep grid point.
///
/// Returns points in grid order regardless of how the work was scheduled.
///
/// # Errors
/// Rejects an invalid sweep definition up front; invalid options surface
/// from the per-point runs.
pub fn run_ambient_sweep(
    model: &EngineModel,
    profile: &TorqueProfile,
    sweep: &AmbientSweep,
    opts: &SimOptions,
) -> SimResult<Vec<SweepPoint>> {
    sweep.validate()?;
    let grid = sweep.generate_points();

    grid.par_iter()
        .map(|&requested_c| {
            let run_model = model.with_ambient(requested_c);
            let report = run_superheat(&run_model, profile, opts)?;
            Ok(SweepPoint {
                requested_c,
                ambient_c: run_model.ambient_temp_c(),
                report,
            })
        })
        .collect()
}
