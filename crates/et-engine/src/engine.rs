//! Engine thermal and crankshaft model.

use crate::ambient::AmbientScreen;
use crate::error::{EngineError, EngineResult};
use et_core::ensure_finite;

/// Lumped thermal and kinematic model of a single engine.
///
/// Immutable after construction. Per discrete time step the model exposes
/// three pure rates:
///
/// ```text
/// heating = τ * Hm + v² * Hv        (°C per step)
/// cooling = C * (T_amb - T)          (°C per step)
/// dv      = τ / I                    (velocity units per step)
/// ```
///
/// where:
/// - I is the crankshaft moment of inertia
/// - Hm, Hv scale the torque and velocity² heating contributions
/// - C scales the cooling toward ambient
///
/// All temperatures are in °C. The ambient temperature is screened at
/// construction (see [`AmbientScreen`]); everything else must be finite and
/// the inertia must be positive, so the rate methods are infallible.
#[derive(Clone, Debug)]
pub struct EngineModel {
    /// Crankshaft moment of inertia, positive
    pub inertia: f64,
    /// Heating contribution per unit torque (Hm)
    pub heating_torque_coeff: f64,
    /// Heating contribution per unit velocity² (Hv)
    pub heating_velocity_coeff: f64,
    /// Cooling contribution per °C of ambient/engine difference (C)
    pub cooling_coeff: f64,
    /// Superheat threshold (°C)
    pub superheat_temp_c: f64,
    /// Screened ambient temperature; kept private so the [-50, 50] °C
    /// invariant survives construction
    ambient: AmbientScreen,
}

impl EngineModel {
    /// Create a new engine model.
    ///
    /// # Arguments
    /// * `inertia` - Crankshaft moment of inertia, must be positive
    /// * `superheat_temp_c` - Overheat threshold (°C)
    /// * `heating_torque_coeff` - Torque heating coefficient (Hm)
    /// * `heating_velocity_coeff` - Velocity² heating coefficient (Hv)
    /// * `cooling_coeff` - Cooling coefficient (C)
    /// * `ambient_temp_c` - Requested ambient temperature (°C); values
    ///   outside [-50, 50] are replaced with 0 rather than rejected
    ///
    /// # Errors
    /// Returns an error if the inertia is not positive and finite, or any
    /// coefficient or the threshold is non-finite. An out-of-range ambient
    /// is not an error.
    pub fn new(
        inertia: f64,
        superheat_temp_c: f64,
        heating_torque_coeff: f64,
        heating_velocity_coeff: f64,
        cooling_coeff: f64,
        ambient_temp_c: f64,
    ) -> EngineResult<Self> {
        if !inertia.is_finite() || inertia <= 0.0 {
            return Err(EngineError::ZeroInertia { inertia });
        }
        check_finite(superheat_temp_c, "superheat_temp_c")?;
        check_finite(heating_torque_coeff, "heating_torque_coeff")?;
        check_finite(heating_velocity_coeff, "heating_velocity_coeff")?;
        check_finite(cooling_coeff, "cooling_coeff")?;

        Ok(Self {
            inertia,
            heating_torque_coeff,
            heating_velocity_coeff,
            cooling_coeff,
            superheat_temp_c,
            ambient: screen_ambient(ambient_temp_c),
        })
    }

    /// Same engine with a different ambient temperature.
    ///
    /// Infallible: coefficients were validated when `self` was built, and
    /// the new ambient goes through the same screening as in `new`.
    pub fn with_ambient(&self, ambient_temp_c: f64) -> EngineModel {
        EngineModel {
            ambient: screen_ambient(ambient_temp_c),
            ..self.clone()
        }
    }

    /// Ambient temperature the model runs with (°C), always in [-50, 50].
    pub fn ambient_temp_c(&self) -> f64 {
        self.ambient.effective_c()
    }

    /// How the requested ambient temperature was screened.
    pub fn ambient_screen(&self) -> AmbientScreen {
        self.ambient
    }

    /// Temperature gain from engine load (°C per step).
    ///
    /// `τ * Hm + v² * Hv`. No sign restriction: a negative torque reduces
    /// the net rate.
    pub fn heating_rate(&self, torque: f64, velocity: f64) -> f64 {
        torque * self.heating_torque_coeff + velocity * velocity * self.heating_velocity_coeff
    }

    /// Temperature change toward ambient (°C per step).
    ///
    /// `C * (T_amb - T)`: negative whenever the engine is hotter than the
    /// surroundings.
    pub fn cooling_rate(&self, ambient_c: f64, engine_temp_c: f64) -> f64 {
        self.cooling_coeff * (ambient_c - engine_temp_c)
    }

    /// Crankshaft velocity gain from the applied torque (per step).
    ///
    /// `τ / I`. Infallible: construction guarantees a positive inertia.
    pub fn crankshaft_acceleration(&self, torque: f64) -> f64 {
        torque / self.inertia
    }
}

/// Ensure a model parameter is finite, naming it in the error if not.
fn check_finite(value: f64, what: &'static str) -> EngineResult<()> {
    ensure_finite(value, what).map_err(|_| EngineError::NonFiniteCoefficient { what, value })?;
    Ok(())
}

fn screen_ambient(ambient_temp_c: f64) -> AmbientScreen {
    let screen = AmbientScreen::screen(ambient_temp_c);
    if screen.rejected() {
        tracing::warn!(
            supplied = ambient_temp_c,
            "ambient temperature outside [-50, 50] °C, running with 0 °C"
        );
    }
    screen
}
