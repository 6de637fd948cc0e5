//! Scenario schema definitions.

use crate::ScenarioResult;
use et_engine::{EngineModel, TorqueProfile};
use et_sim::SimOptions;
use serde::{Deserialize, Serialize};

/// Latest supported scenario file version.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub engine: EngineDef,
    pub profile: ProfileDef,
    #[serde(default)]
    pub run: RunDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    pub inertia: f64,
    pub superheat_temp_c: f64,
    pub heating_torque_coeff: f64,
    pub heating_velocity_coeff: f64,
    pub cooling_coeff: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDef {
    pub velocity_breakpoints: Vec<f64>,
    pub torque_breakpoints: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "default_budget_steps")]
    pub budget_steps: u32,
    #[serde(default = "default_record_every")]
    pub record_every: u32,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            budget_steps: default_budget_steps(),
            record_every: default_record_every(),
        }
    }
}

fn default_budget_steps() -> u32 {
    300
}

fn default_record_every() -> u32 {
    1
}

impl Scenario {
    /// Built-in default scenario: the reference engine this tool ships with.
    pub fn stock() -> Self {
        Scenario {
            version: LATEST_VERSION,
            name: "stock engine".to_string(),
            engine: EngineDef {
                inertia: 10.0,
                superheat_temp_c: 110.0,
                heating_torque_coeff: 0.01,
                heating_velocity_coeff: 0.0001,
                cooling_coeff: 0.01,
            },
            profile: ProfileDef {
                velocity_breakpoints: vec![0.0, 75.0, 150.0, 200.0, 250.0, 300.0],
                torque_breakpoints: vec![20.0, 75.0, 100.0, 105.0, 75.0, 0.0],
            },
            run: RunDef::default(),
        }
    }

    /// Construct the validated model, profile and run options.
    ///
    /// The ambient temperature is supplied at build time (it comes from the
    /// user, not the file) and goes through the model's usual screening.
    pub fn build(
        &self,
        ambient_temp_c: f64,
    ) -> ScenarioResult<(EngineModel, TorqueProfile, SimOptions)> {
        let engine = EngineModel::new(
            self.engine.inertia,
            self.engine.superheat_temp_c,
            self.engine.heating_torque_coeff,
            self.engine.heating_velocity_coeff,
            self.engine.cooling_coeff,
            ambient_temp_c,
        )?;
        let profile = TorqueProfile::new(
            self.profile.velocity_breakpoints.clone(),
            self.profile.torque_breakpoints.clone(),
        )?;
        let opts = SimOptions {
            budget_steps: self.run.budget_steps,
            record_every: self.run.record_every,
        };
        Ok((engine, profile, opts))
    }
}
