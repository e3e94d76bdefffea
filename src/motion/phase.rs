// src/motion/phase.rs
//! Constant-jerk phase kinematics.
//!
//! A jerk-limited velocity profile is a chain of phases, each with a fixed
//! jerk. Inside one phase velocity is quadratic and acceleration is linear in
//! the time elapsed since the phase began.

use serde::Serialize;

/// Which segment of the S-curve owns a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Acceleration ramps from zero toward its peak.
    Concave,
    /// Constant acceleration.
    Linear,
    /// Acceleration ramps back to zero.
    Convex,
    /// Trajectory finished (or never started).
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Concave => "concave",
            Phase::Linear => "linear",
            Phase::Convex => "convex",
            Phase::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Velocity and acceleration after `t` time units of constant `jerk`,
/// starting from `v0` and `a0`.
///
/// Total over all real inputs; callers pass `t >= 0`.
#[inline]
pub fn evaluate_phase(v0: f64, a0: f64, jerk: f64, t: f64) -> (f64, f64) {
    let velocity = v0 + a0 * t + jerk * t * t / 2.0;
    let acceleration = a0 + jerk * t;
    (velocity, acceleration)
}

/// One constant-jerk segment of a planned profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSegment {
    pub phase: Phase,
    /// Velocity at the start of the segment
    pub start_velocity: f64,
    /// Acceleration at the start of the segment
    pub start_acceleration: f64,
    pub jerk: f64,
    /// Absolute time (since trajectory start) at which the segment begins
    pub start_time: f64,
    pub duration: f64,
}

impl PhaseSegment {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Evaluate at an absolute trajectory time.
    pub fn evaluate(&self, t: f64) -> (f64, f64) {
        evaluate_phase(
            self.start_velocity,
            self.start_acceleration,
            self.jerk,
            t - self.start_time,
        )
    }

    /// State at the end of the segment.
    pub fn end_state(&self) -> (f64, f64) {
        evaluate_phase(
            self.start_velocity,
            self.start_acceleration,
            self.jerk,
            self.duration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_time_returns_initial_state() {
        assert_eq!(evaluate_phase(3.0, -2.0, 7.0, 0.0), (3.0, -2.0));
    }

    #[test]
    fn test_constant_acceleration() {
        let (v, a) = evaluate_phase(1.0, 2.0, 0.0, 3.0);
        assert_eq!(v, 7.0);
        assert_eq!(a, 2.0);
    }

    #[test]
    fn test_constant_jerk() {
        let (v, a) = evaluate_phase(10.0, 0.0, -2.0, 4.0);
        // 10 - 2 * 16 / 2
        assert_eq!(v, -6.0);
        assert_eq!(a, -8.0);
    }

    #[test]
    fn test_segment_uses_local_time() {
        let segment = PhaseSegment {
            phase: Phase::Convex,
            start_velocity: 50.0,
            start_acceleration: -10.0,
            jerk: 1.0,
            start_time: 50.0,
            duration: 10.0,
        };
        assert_eq!(segment.evaluate(50.0), (50.0, -10.0));
        assert_eq!(segment.end_time(), 60.0);
        let (v, a) = segment.end_state();
        assert!(v.abs() < 1e-12);
        assert!(a.abs() < 1e-12);
        assert_eq!(segment.evaluate(60.0), segment.end_state());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Concave.to_string(), "concave");
        assert_eq!(Phase::Complete.as_str(), "complete");
    }
}
