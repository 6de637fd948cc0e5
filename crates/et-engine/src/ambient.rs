//! Ambient temperature screening.
//!
//! The model only trusts ambient temperatures in [-50, 50] °C. Anything
//! outside that band (including non-finite input) falls back to 0 °C rather
//! than failing the run, and the fallback is recorded so callers can report
//! it.

/// Lowest accepted ambient temperature (°C).
pub const AMBIENT_MIN_C: f64 = -50.0;
/// Highest accepted ambient temperature (°C).
pub const AMBIENT_MAX_C: f64 = 50.0;
/// Fallback used when the supplied ambient is rejected (°C).
pub const AMBIENT_FALLBACK_C: f64 = 0.0;

/// Outcome of screening a requested ambient temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AmbientScreen {
    /// Supplied value was in range and is used as-is.
    Accepted(f64),
    /// Supplied value was rejected; the model runs with the 0 °C fallback.
    OutOfRange { supplied: f64 },
}

impl AmbientScreen {
    /// Screen a requested ambient temperature against [-50, 50] °C.
    ///
    /// NaN compares false against both bounds, so non-finite input lands in
    /// `OutOfRange` like any other rejected value.
    pub fn screen(supplied_c: f64) -> Self {
        if supplied_c >= AMBIENT_MIN_C && supplied_c <= AMBIENT_MAX_C {
            AmbientScreen::Accepted(supplied_c)
        } else {
            AmbientScreen::OutOfRange {
                supplied: supplied_c,
            }
        }
    }

    /// Temperature the model actually runs with (°C).
    pub fn effective_c(&self) -> f64 {
        match self {
            AmbientScreen::Accepted(v) => *v,
            AmbientScreen::OutOfRange { .. } => AMBIENT_FALLBACK_C,
        }
    }

    /// True when the supplied value was rejected.
    pub fn rejected(&self) -> bool {
        matches!(self, AmbientScreen::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_accepted() {
        assert_eq!(AmbientScreen::screen(25.0), AmbientScreen::Accepted(25.0));
        assert_eq!(AmbientScreen::screen(25.0).effective_c(), 25.0);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(AmbientScreen::screen(-50.0).effective_c(), -50.0);
        assert_eq!(AmbientScreen::screen(50.0).effective_c(), 50.0);
        assert!(!AmbientScreen::screen(-50.0).rejected());
        assert!(!AmbientScreen::screen(50.0).rejected());
    }

    #[test]
    fn out_of_range_falls_back_to_zero() {
        let screen = AmbientScreen::screen(1000.0);
        assert!(screen.rejected());
        assert_eq!(screen.effective_c(), 0.0);
        assert_eq!(screen, AmbientScreen::OutOfRange { supplied: 1000.0 });

        assert!(AmbientScreen::screen(-50.1).rejected());
        assert!(AmbientScreen::screen(50.1).rejected());
    }

    #[test]
    fn non_finite_rejected() {
        assert!(AmbientScreen::screen(f64::NAN).rejected());
        assert!(AmbientScreen::screen(f64::INFINITY).rejected());
        assert!(AmbientScreen::screen(f64::NEG_INFINITY).rejected());
        assert_eq!(AmbientScreen::screen(f64::NAN).effective_c(), 0.0);
    }
}
