//! Superheat simulation runner and result recording.

use crate::error::{SimError, SimResult};
use et_engine::{EngineModel, TorqueProfile};

/// Options for superheat runs.
#[derive(Clone, Copy, Debug)]
pub struct SimOptions {
    /// Maximum number of steps before the run gives up
    pub budget_steps: u32,
    /// Record every N-th step (decimation)
    pub record_every: u32,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            budget_steps: 300,
            record_every: 1,
        }
    }
}

/// One recorded simulation step.
#[derive(Clone, Copy, Debug)]
pub struct StepSnapshot {
    /// 1-based step count at the time of recording
    pub step: u32,
    /// Engine temperature after the step (°C)
    pub temp_c: f64,
    /// Crankshaft velocity after the step
    pub velocity: f64,
    /// Torque resolved during the step
    pub torque: f64,
    /// Profile segment used during the step
    pub segment: usize,
}

/// Decimated record of a run. The final executed step is always present.
#[derive(Clone, Debug)]
pub struct RunTrace {
    /// Decimation the trace was recorded with
    pub record_every: u32,
    /// Recorded steps in execution order
    pub steps: Vec<StepSnapshot>,
}

/// Terminal outcome of a superheat run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Temperature reached the threshold after this many steps.
    Superheated { after_steps: u32 },
    /// The step budget ran out first.
    NeverSuperheated,
}

/// Everything a superheat run produces.
#[derive(Clone, Debug)]
pub struct SuperheatReport {
    pub outcome: Outcome,
    /// Step budget the run was given
    pub budget_steps: u32,
    /// Temperature at step 0 (°C), i.e. the screened ambient
    pub start_temp_c: f64,
    /// Temperature after the last executed step (°C)
    pub final_temp_c: f64,
    /// Velocity after the last executed step
    pub final_velocity: f64,
    /// Profile segment in use when the run ended
    pub final_segment: usize,
    pub trace: RunTrace,
}

impl SuperheatReport {
    /// The legacy integer channel: steps to superheat, or exactly the
    /// budget when the engine never superheated.
    pub fn legacy_code(&self) -> i64 {
        match self.outcome {
            Outcome::Superheated { after_steps } => i64::from(after_steps),
            Outcome::NeverSuperheated => i64::from(self.budget_steps),
        }
    }

    /// True when the run ended in superheat.
    pub fn superheated(&self) -> bool {
        matches!(self.outcome, Outcome::Superheated { .. })
    }
}

/// Mutable per-run loop state. One per invocation, never shared.
#[derive(Clone, Debug)]
struct RunState {
    temp_c: f64,
    velocity: f64,
    segment: usize,
    torque: f64,
    acceleration: f64,
    elapsed_steps: u32,
}

impl RunState {
    fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            step: self.elapsed_steps,
            temp_c: self.temp_c,
            velocity: self.velocity,
            torque: self.torque,
            segment: self.segment,
        }
    }
}

/// Run the fixed-step superheat simulation.
///
/// Starts the engine at the screened ambient temperature with zero velocity
/// and the profile's first torque breakpoint, then advances one step per
/// time unit until the temperature reaches the superheat threshold or the
/// step budget runs out. Per step:
///
/// 1. velocity gains the previous step's acceleration (one-step lag),
/// 2. the active segment advances by at most one breakpoint,
/// 3. torque is interpolated on the active segment,
/// 4. heating and cooling are applied together to the temperature,
/// 5. acceleration is recomputed from the resolved torque.
///
/// # Errors
/// Only option validation fails; the loop itself cannot.
pub fn run_superheat(
    model: &EngineModel,
    profile: &TorqueProfile,
    opts: &SimOptions,
) -> SimResult<SuperheatReport> {
    if opts.budget_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "budget_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let ambient_c = model.ambient_temp_c();
    let last_segment = profile.last_segment();
    let velocities = profile.velocity_breakpoints();

    let mut state = RunState {
        temp_c: ambient_c,
        velocity: 0.0,
        segment: 0,
        torque: profile.torque_breakpoints()[0],
        acceleration: 0.0,
        elapsed_steps: 0,
    };
    state.acceleration = model.crankshaft_acceleration(state.torque);

    let mut trace = RunTrace {
        record_every: opts.record_every,
        steps: Vec::new(),
    };
    let mut outcome = Outcome::NeverSuperheated;

    while state.elapsed_steps < opts.budget_steps {
        state.velocity += state.acceleration;

        // At most one segment advance per step, even when the velocity
        // overshoots several breakpoints at once.
        if state.segment < last_segment && state.velocity > velocities[state.segment + 1] {
            state.segment += 1;
        }

        state.torque = profile.segment(state.segment).torque_at(state.velocity);

        let heating = model.heating_rate(state.torque, state.velocity);
        let cooling = model.cooling_rate(ambient_c, state.temp_c);
        state.temp_c += heating + cooling;

        state.acceleration = model.crankshaft_acceleration(state.torque);
        state.elapsed_steps += 1;

        // Record if decimation matches
        if state.elapsed_steps % opts.record_every == 0 {
            trace.steps.push(state.snapshot());
        }

        if state.temp_c >= model.superheat_temp_c {
            outcome = Outcome::Superheated {
                after_steps: state.elapsed_steps,
            };
            break;
        }
    }

    // Always record the final step
    if state.elapsed_steps % opts.record_every != 0 {
        trace.steps.push(state.snapshot());
    }

    tracing::debug!(
        outcome = ?outcome,
        steps = state.elapsed_steps,
        final_temp_c = state.temp_c,
        "superheat run finished"
    );

    Ok(SuperheatReport {
        outcome,
        budget_steps: opts.budget_steps,
        start_temp_c: ambient_c,
        final_temp_c: state.temp_c,
        final_velocity: state.velocity,
        final_segment: state.segment,
        trace,
    })
}

/// Legacy integer-channel entry point.
///
/// Builds the profile from raw breakpoint slices and runs with the given
/// step budget. Any setup failure maps to `-1` (historically the
/// mismatched-lengths sentinel); otherwise the return value is the number
/// of steps to superheat, or exactly `budget_steps` when the engine never
/// superheats. The result is therefore always in `{-1} ∪ [1, budget]`.
pub fn superheat_time(
    model: &EngineModel,
    velocity_breakpoints: &[f64],
    torque_breakpoints: &[f64],
    budget_steps: u32,
) -> i64 {
    match try_superheat_time(model, velocity_breakpoints, torque_breakpoints, budget_steps) {
        Ok(report) => report.legacy_code(),
        Err(_) => -1,
    }
}

fn try_superheat_time(
    model: &EngineModel,
    velocity_breakpoints: &[f64],
    torque_breakpoints: &[f64],
    budget_steps: u32,
) -> SimResult<SuperheatReport> {
    let profile = TorqueProfile::new(velocity_breakpoints.to_vec(), torque_breakpoints.to_vec())?;
    let opts = SimOptions {
        budget_steps,
        // The legacy channel has no trace consumer; keep only the final step
        record_every: budget_steps.max(1),
    };
    run_superheat(model, &profile, &opts)
}
