//! Scenario validation logic.
//!
//! Duplicates the engine layer's physical checks in schema terms so a bad
//! file is reported with its field path before any model is built.

use crate::schema::{LATEST_VERSION, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    validate_positive_finite("engine inertia", scenario.engine.inertia)?;
    validate_finite("engine superheat_temp_c", scenario.engine.superheat_temp_c)?;
    validate_finite(
        "engine heating_torque_coeff",
        scenario.engine.heating_torque_coeff,
    )?;
    validate_finite(
        "engine heating_velocity_coeff",
        scenario.engine.heating_velocity_coeff,
    )?;
    validate_finite("engine cooling_coeff", scenario.engine.cooling_coeff)?;

    let velocities = &scenario.profile.velocity_breakpoints;
    let torques = &scenario.profile.torque_breakpoints;

    if torques.len() != velocities.len() {
        return Err(ValidationError::InvalidValue {
            field: "profile torque_breakpoints".to_string(),
            value: torques.len().to_string(),
            reason: format!(
                "must match velocity_breakpoints length {}",
                velocities.len()
            ),
        });
    }
    if velocities.len() < 2 {
        return Err(ValidationError::InvalidValue {
            field: "profile velocity_breakpoints".to_string(),
            value: velocities.len().to_string(),
            reason: "need at least 2 breakpoints".to_string(),
        });
    }

    for (i, v) in velocities.iter().enumerate() {
        if !v.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("profile velocity_breakpoints[{i}]"),
                value: v.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    for (i, t) in torques.iter().enumerate() {
        if !t.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("profile torque_breakpoints[{i}]"),
                value: t.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    for i in 0..velocities.len() - 1 {
        if velocities[i + 1] <= velocities[i] {
            return Err(ValidationError::InvalidValue {
                field: format!("profile velocity_breakpoints[{}]", i + 1),
                value: velocities[i + 1].to_string(),
                reason: "must be strictly increasing".to_string(),
            });
        }
    }

    if scenario.run.budget_steps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "run budget_steps".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if scenario.run.record_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "run record_every".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(())
}

fn validate_positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Scenario;

    #[test]
    fn stock_scenario_is_valid() {
        assert!(validate_scenario(&Scenario::stock()).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut scenario = Scenario::stock();
        scenario.version = 2;
        assert!(matches!(
            validate_scenario(&scenario),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        ));
    }

    #[test]
    fn rejects_non_positive_inertia() {
        let mut scenario = Scenario::stock();
        scenario.engine.inertia = 0.0;
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("inertia"));
    }

    #[test]
    fn rejects_non_finite_coefficient() {
        let mut scenario = Scenario::stock();
        scenario.engine.cooling_coeff = f64::NAN;
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("cooling_coeff"));
    }

    #[test]
    fn rejects_mismatched_breakpoints() {
        let mut scenario = Scenario::stock();
        scenario.profile.torque_breakpoints.pop();
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("torque_breakpoints"));
    }

    #[test]
    fn rejects_single_breakpoint() {
        let mut scenario = Scenario::stock();
        scenario.profile.velocity_breakpoints = vec![0.0];
        scenario.profile.torque_breakpoints = vec![20.0];
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn rejects_unordered_velocities() {
        let mut scenario = Scenario::stock();
        scenario.profile.velocity_breakpoints = vec![0.0, 100.0, 100.0, 200.0, 250.0, 300.0];
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
        assert!(err.to_string().contains("velocity_breakpoints[2]"));
    }

    #[test]
    fn rejects_non_finite_breakpoint() {
        let mut scenario = Scenario::stock();
        scenario.profile.torque_breakpoints[3] = f64::INFINITY;
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("torque_breakpoints[3]"));
    }

    #[test]
    fn rejects_zero_budget_and_decimation() {
        let mut scenario = Scenario::stock();
        scenario.run.budget_steps = 0;
        assert!(validate_scenario(&scenario).is_err());

        let mut scenario = Scenario::stock();
        scenario.run.record_every = 0;
        assert!(validate_scenario(&scenario).is_err());
    }
}
