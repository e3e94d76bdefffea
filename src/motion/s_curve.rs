// src/motion/s_curve.rs
//! S-curve velocity profile planner
//!
//! Moves a velocity from `v_start` to `v_target` through three constant-jerk
//! phases: concave (acceleration ramps up), linear (acceleration held) and
//! convex (acceleration ramps back to zero). When the velocity change is too
//! small to reach the acceleration limit, the linear phase collapses and the
//! profile peaks below the limit.
//!
//! Acceleration and jerk limits use a negative-limit convention: `a_limit`
//! and `j_limit` must be strictly negative for a profile to be planned. Use
//! [`TrajectoryParams::from_magnitudes`] to pass positive limits instead.
//!
//! Nothing here returns an error. Inputs that cannot produce a profile fold
//! into a completed sample holding `v_start` with zero acceleration.

use serde::Serialize;

use super::phase::{Phase, PhaseSegment};

/// Inputs for one trajectory. Fixed for the lifetime of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryParams {
    pub v_start: f64,
    pub v_target: f64,
    /// Acceleration limit, negative convention
    pub a_limit: f64,
    /// Jerk limit, negative convention
    pub j_limit: f64,
}

impl TrajectoryParams {
    pub fn new(v_start: f64, v_target: f64, a_limit: f64, j_limit: f64) -> Self {
        Self {
            v_start,
            v_target,
            a_limit,
            j_limit,
        }
    }

    /// Build from positive acceleration and jerk magnitudes.
    pub fn from_magnitudes(v_start: f64, v_target: f64, max_accel: f64, max_jerk: f64) -> Self {
        Self::new(v_start, v_target, -max_accel, -max_jerk)
    }

    /// True when the inputs alone rule out a profile.
    pub fn is_degenerate(&self) -> bool {
        self.v_start == self.v_target
            || self.a_limit >= 0.0
            || self.j_limit >= 0.0
            || self.a_limit.is_nan()
            || self.j_limit.is_nan()
    }
}

/// Velocity and acceleration to command at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleResult {
    pub completed: bool,
    pub velocity: f64,
    pub acceleration: f64,
}

impl SampleResult {
    fn running(velocity: f64, acceleration: f64) -> Self {
        Self {
            completed: false,
            velocity,
            acceleration,
        }
    }

    fn finished(velocity: f64) -> Self {
        Self {
            completed: true,
            velocity,
            acceleration: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PhasePlan {
    direction: f64,
    peak_acceleration: f64,
    /// t0, t1, t2, t_end
    boundaries: [f64; 4],
    segments: [PhaseSegment; 3],
}

/// A planned profile. Phase boundaries depend only on [`TrajectoryParams`],
/// so they are derived once here and reused for every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SCurveProfile {
    params: TrajectoryParams,
    plan: Option<PhasePlan>,
}

impl SCurveProfile {
    pub fn plan(params: TrajectoryParams) -> Self {
        if params.is_degenerate() {
            tracing::trace!(?params, "degenerate trajectory inputs, holding start velocity");
            return Self { params, plan: None };
        }

        let plan = derive_phases(&params);
        match &plan {
            Some(plan) => tracing::trace!(
                ?params,
                peak_acceleration = plan.peak_acceleration,
                duration = plan.boundaries[3],
                "planned s-curve"
            ),
            None => tracing::trace!(?params, "s-curve derivation not finite, holding start velocity"),
        }
        Self { params, plan }
    }

    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    pub fn is_degenerate(&self) -> bool {
        self.plan.is_none()
    }

    /// Total time from start to completion, `None` for degenerate profiles.
    pub fn duration(&self) -> Option<f64> {
        self.plan.as_ref().map(|plan| plan.boundaries[3])
    }

    /// Absolute phase boundary times `[t0, t1, t2, t_end]`.
    pub fn boundaries(&self) -> Option<[f64; 4]> {
        self.plan.as_ref().map(|plan| plan.boundaries)
    }

    /// Signed acceleration held during the linear phase.
    pub fn peak_acceleration(&self) -> Option<f64> {
        self.plan.as_ref().map(|plan| plan.peak_acceleration)
    }

    /// +1.0 when accelerating, -1.0 when decelerating.
    pub fn direction(&self) -> Option<f64> {
        self.plan.as_ref().map(|plan| plan.direction)
    }

    pub fn segments(&self) -> Option<&[PhaseSegment; 3]> {
        self.plan.as_ref().map(|plan| &plan.segments)
    }

    /// Phase that owns instant `t`.
    pub fn phase_at(&self, t: f64) -> Phase {
        match self.active_segment(t) {
            Some(segment) => segment.phase,
            None => Phase::Complete,
        }
    }

    /// Velocity and acceleration at `t` time units after the trajectory start.
    pub fn sample(&self, t: f64) -> SampleResult {
        if self.plan.is_none() || t < 0.0 || t.is_nan() {
            return SampleResult::finished(self.params.v_start);
        }
        match self.active_segment(t) {
            Some(segment) => {
                let (velocity, acceleration) = segment.evaluate(t);
                SampleResult::running(velocity, acceleration)
            }
            None => SampleResult::finished(self.params.v_target),
        }
    }

    // Boundary ownership: [t0, t1] concave, (t1, t2) linear, [t2, t_end] convex.
    fn active_segment(&self, t: f64) -> Option<&PhaseSegment> {
        let plan = self.plan.as_ref()?;
        let [t0, t1, t2, t_end] = plan.boundaries;
        let [concave, linear, convex] = &plan.segments;
        if t >= t0 && t <= t1 {
            Some(concave)
        } else if t > t1 && t < t2 {
            Some(linear)
        } else if t >= t2 && t <= t_end {
            Some(convex)
        } else {
            None
        }
    }
}

fn derive_phases(params: &TrajectoryParams) -> Option<PhasePlan> {
    let a_max = params.a_limit.abs();
    let j_max = params.j_limit.abs();

    let half_delta = (params.v_target - params.v_start).abs() / 2.0;
    let accel_limited_delta = a_max * a_max / (2.0 * j_max);
    let phase_delta = accel_limited_delta.min(half_delta);

    let direction = if params.v_start < params.v_target { 1.0 } else { -1.0 };
    let v1 = params.v_start + direction * phase_delta;
    let v2 = params.v_target - direction * phase_delta;

    let concave_jerk = direction * j_max;
    let convex_jerk = direction * -j_max;

    let a1 = direction * (phase_delta * 2.0 * concave_jerk.abs()).sqrt();
    let dur_concave = (a1 / concave_jerk).abs();
    let dur_linear = ((v2 - v1) / a1).abs();
    let dur_convex = dur_concave;

    // a1 == 0 happens when the velocity gap underflows to zero after halving.
    if a1 == 0.0 || !a1.is_finite() || !dur_concave.is_finite() || !dur_linear.is_finite() {
        return None;
    }

    let t0 = 0.0;
    let t1 = t0 + dur_concave;
    let t2 = t1 + dur_linear;
    let t_end = t2 + dur_convex;
    if !t_end.is_finite() {
        return None;
    }

    Some(PhasePlan {
        direction,
        peak_acceleration: a1,
        boundaries: [t0, t1, t2, t_end],
        segments: [
            PhaseSegment {
                phase: Phase::Concave,
                start_velocity: params.v_start,
                start_acceleration: 0.0,
                jerk: concave_jerk,
                start_time: t0,
                duration: dur_concave,
            },
            PhaseSegment {
                phase: Phase::Linear,
                start_velocity: v1,
                start_acceleration: a1,
                jerk: 0.0,
                start_time: t1,
                duration: dur_linear,
            },
            PhaseSegment {
                phase: Phase::Convex,
                start_velocity: v2,
                start_acceleration: a1,
                jerk: convex_jerk,
                start_time: t2,
                duration: dur_convex,
            },
        ],
    })
}

/// Evaluate a trajectory at `elapsed` time units after its start.
///
/// Stateless: phase boundaries are re-derived on every call. Hold an
/// [`SCurveProfile`] instead when sampling the same trajectory repeatedly.
pub fn evaluate_trajectory(
    v_start: f64,
    v_target: f64,
    a_limit: f64,
    j_limit: f64,
    elapsed: f64,
) -> SampleResult {
    SCurveProfile::plan(TrajectoryParams::new(v_start, v_target, a_limit, j_limit)).sample(elapsed)
}
