//! Piecewise-linear torque/speed operating profile.

use crate::error::{EngineError, EngineResult};

/// One straight-line span between two adjacent profile breakpoints.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    /// Velocity at the lower breakpoint
    pub v1: f64,
    /// Torque at the lower breakpoint
    pub t1: f64,
    /// Velocity at the upper breakpoint
    pub v2: f64,
    /// Torque at the upper breakpoint
    pub t2: f64,
}

impl Segment {
    /// Torque on the straight line through (v1, t1) and (v2, t2).
    ///
    /// Velocities outside [v1, v2] extrapolate along the same line; there is
    /// no clamping, so extrapolated torque can go negative.
    pub fn torque_at(&self, velocity: f64) -> f64 {
        (velocity - self.v1) / (self.v2 - self.v1) * (self.t2 - self.t1) + self.t1
    }
}

/// Torque as a piecewise-linear function of crankshaft velocity.
///
/// Holds paired breakpoint lists: `velocity_breakpoints[i]` maps to
/// `torque_breakpoints[i]`. Velocities must be strictly increasing, so every
/// segment has a positive width and interpolation never divides by zero.
/// All of that is checked once at construction; lookups are infallible.
#[derive(Clone, Debug)]
pub struct TorqueProfile {
    velocity_breakpoints: Vec<f64>,
    torque_breakpoints: Vec<f64>,
}

impl TorqueProfile {
    /// Build a profile from paired breakpoint lists.
    ///
    /// # Errors
    /// Rejects mismatched list lengths, fewer than 2 breakpoints, non-finite
    /// entries, equal consecutive velocities (zero-width segment) and
    /// decreasing velocities.
    pub fn new(velocity_breakpoints: Vec<f64>, torque_breakpoints: Vec<f64>) -> EngineResult<Self> {
        if torque_breakpoints.len() != velocity_breakpoints.len() {
            return Err(EngineError::MismatchedBreakpoints {
                torque_len: torque_breakpoints.len(),
                velocity_len: velocity_breakpoints.len(),
            });
        }

        let len = velocity_breakpoints.len();
        if len < 2 {
            return Err(EngineError::TooFewBreakpoints { len });
        }

        for (index, v) in velocity_breakpoints.iter().enumerate() {
            if !v.is_finite() {
                return Err(EngineError::NonFiniteBreakpoint {
                    what: "velocity",
                    index,
                });
            }
        }
        for (index, t) in torque_breakpoints.iter().enumerate() {
            if !t.is_finite() {
                return Err(EngineError::NonFiniteBreakpoint {
                    what: "torque",
                    index,
                });
            }
        }

        for index in 0..len - 1 {
            let v1 = velocity_breakpoints[index];
            let v2 = velocity_breakpoints[index + 1];
            if v2 == v1 {
                return Err(EngineError::DegenerateSegment { index });
            }
            if v2 < v1 {
                return Err(EngineError::UnorderedBreakpoints { index: index + 1 });
            }
        }

        Ok(Self {
            velocity_breakpoints,
            torque_breakpoints,
        })
    }

    /// Number of breakpoints (≥ 2).
    pub fn breakpoint_count(&self) -> usize {
        self.velocity_breakpoints.len()
    }

    /// Index of the last segment (`breakpoint_count - 2`).
    pub fn last_segment(&self) -> usize {
        self.velocity_breakpoints.len() - 2
    }

    /// Velocity breakpoints, strictly increasing.
    pub fn velocity_breakpoints(&self) -> &[f64] {
        &self.velocity_breakpoints
    }

    /// Torque breakpoints, paired by index with the velocities.
    pub fn torque_breakpoints(&self) -> &[f64] {
        &self.torque_breakpoints
    }

    /// The straight-line span starting at breakpoint `index`.
    ///
    /// # Panics
    /// Panics if `index > last_segment()`.
    pub fn segment(&self, index: usize) -> Segment {
        Segment {
            v1: self.velocity_breakpoints[index],
            t1: self.torque_breakpoints[index],
            v2: self.velocity_breakpoints[index + 1],
            t2: self.torque_breakpoints[index + 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_profile() -> TorqueProfile {
        TorqueProfile::new(
            vec![0.0, 75.0, 150.0, 200.0, 250.0, 300.0],
            vec![20.0, 75.0, 100.0, 105.0, 75.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn profile_creation() {
        let profile = stock_profile();
        assert_eq!(profile.breakpoint_count(), 6);
        assert_eq!(profile.last_segment(), 4);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = TorqueProfile::new(vec![0.0, 100.0, 200.0, 300.0], vec![20.0, 50.0, 10.0]);
        assert!(matches!(
            result,
            Err(EngineError::MismatchedBreakpoints {
                torque_len: 3,
                velocity_len: 4,
            })
        ));
    }

    #[test]
    fn rejects_too_few_breakpoints() {
        let result = TorqueProfile::new(vec![0.0], vec![20.0]);
        assert!(matches!(result, Err(EngineError::TooFewBreakpoints { len: 1 })));

        let result = TorqueProfile::new(vec![], vec![]);
        assert!(matches!(result, Err(EngineError::TooFewBreakpoints { len: 0 })));
    }

    #[test]
    fn rejects_non_finite_breakpoints() {
        let result = TorqueProfile::new(vec![0.0, f64::NAN, 200.0], vec![20.0, 50.0, 10.0]);
        assert!(matches!(
            result,
            Err(EngineError::NonFiniteBreakpoint {
                what: "velocity",
                index: 1,
            })
        ));

        let result = TorqueProfile::new(vec![0.0, 100.0], vec![20.0, f64::INFINITY]);
        assert!(matches!(
            result,
            Err(EngineError::NonFiniteBreakpoint {
                what: "torque",
                index: 1,
            })
        ));
    }

    #[test]
    fn rejects_zero_width_segment() {
        let result = TorqueProfile::new(vec![0.0, 100.0, 100.0, 200.0], vec![1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            result,
            Err(EngineError::DegenerateSegment { index: 1 })
        ));
    }

    #[test]
    fn rejects_decreasing_velocities() {
        let result = TorqueProfile::new(vec![0.0, 100.0, 50.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(EngineError::UnorderedBreakpoints { index: 2 })
        ));
    }

    #[test]
    fn segment_lookup() {
        let profile = stock_profile();

        let first = profile.segment(0);
        assert_eq!(first.v1, 0.0);
        assert_eq!(first.t1, 20.0);
        assert_eq!(first.v2, 75.0);
        assert_eq!(first.t2, 75.0);

        let last = profile.segment(profile.last_segment());
        assert_eq!(last.v1, 250.0);
        assert_eq!(last.t2, 0.0);
    }

    #[test]
    fn interpolation_within_segment() {
        let profile = stock_profile();
        let segment = profile.segment(0);

        // Endpoints map exactly
        assert_eq!(segment.torque_at(0.0), 20.0);
        assert_eq!(segment.torque_at(75.0), 75.0);

        // Midpoint: 20 + 0.5 * 55 = 47.5
        assert_eq!(segment.torque_at(37.5), 47.5);

        // 2/75 of the way: 20 + 2/75 * 55
        assert_eq!(segment.torque_at(2.0), 21.46666666666667);

        // Segment 2 spans (150, 100) → (200, 105)
        assert_eq!(profile.segment(2).torque_at(160.0), 101.0);
    }

    #[test]
    fn extrapolation_past_last_breakpoint() {
        let profile = stock_profile();
        let last = profile.segment(profile.last_segment());

        // Line through (250, 75) and (300, 0) continues below zero
        assert_eq!(last.torque_at(310.0), -15.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn interior_torque_bounded_by_endpoints(
            v1 in -1.0e3_f64..1.0e3_f64,
            width in 0.1_f64..1.0e3_f64,
            t1 in -1.0e3_f64..1.0e3_f64,
            t2 in -1.0e3_f64..1.0e3_f64,
            frac in 0.0_f64..=1.0_f64,
        ) {
            let segment = Segment { v1, t1, v2: v1 + width, t2 };
            let torque = segment.torque_at(v1 + frac * width);

            let lo = t1.min(t2);
            let hi = t1.max(t2);
            prop_assert!(torque >= lo - 1e-6);
            prop_assert!(torque <= hi + 1e-6);
        }
    }
}
