// src/motion/sampler.rs
//! Fixed-interval sampling of a planned profile.
//!
//! Drives an [`SCurveProfile`] from `elapsed = 0` in equal steps until it
//! reports completion, yielding one [`Sample`] per step. The completing
//! sample is yielded too.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::phase::Phase;
use super::s_curve::{SCurveProfile, TrajectoryParams};

#[derive(Debug, Error, PartialEq)]
pub enum SamplerError {
    #[error("Sampling interval must be positive and finite, got {0}")]
    InvalidInterval(f64),
    #[error("Trajectory did not complete within {samples} samples")]
    Incomplete { samples: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SamplerConfig {
    #[serde(default = "default_interval")]
    pub interval: f64,
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            max_samples: default_max_samples(),
        }
    }
}

fn default_interval() -> f64 { 0.2 }
fn default_max_samples() -> usize { 1_000_000 }

/// One emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub elapsed: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub phase: Phase,
    pub completed: bool,
}

pub struct Sampler {
    profile: SCurveProfile,
    interval: f64,
    max_samples: usize,
    index: usize,
    done: bool,
    truncated: bool,
}

impl Sampler {
    pub fn new(profile: SCurveProfile, config: &SamplerConfig) -> Result<Self, SamplerError> {
        if !(config.interval.is_finite() && config.interval > 0.0) {
            return Err(SamplerError::InvalidInterval(config.interval));
        }
        Ok(Self {
            profile,
            interval: config.interval,
            max_samples: config.max_samples,
            index: 0,
            done: false,
            truncated: false,
        })
    }

    pub fn profile(&self) -> &SCurveProfile {
        &self.profile
    }

    /// Number of samples emitted so far.
    pub fn emitted(&self) -> usize {
        self.index
    }

    /// True once the sample budget ran out before the profile completed.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Iterator for Sampler {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.done {
            return None;
        }
        if self.index >= self.max_samples {
            self.done = true;
            self.truncated = true;
            tracing::warn!(
                samples = self.index,
                "trajectory still running after sample budget exhausted"
            );
            return None;
        }

        let elapsed = self.index as f64 * self.interval;
        let result = self.profile.sample(elapsed);
        self.index += 1;

        let phase = if result.completed {
            self.done = true;
            tracing::debug!(elapsed, samples = self.index, "trajectory completed");
            Phase::Complete
        } else {
            self.profile.phase_at(elapsed)
        };

        Some(Sample {
            elapsed,
            velocity: result.velocity,
            acceleration: result.acceleration,
            phase,
            completed: result.completed,
        })
    }
}

impl std::iter::FusedIterator for Sampler {}

/// Sample a whole trajectory.
pub fn sample_trajectory(
    params: TrajectoryParams,
    config: &SamplerConfig,
) -> Result<Vec<Sample>, SamplerError> {
    let mut sampler = Sampler::new(SCurveProfile::plan(params), config)?;
    let samples: Vec<Sample> = sampler.by_ref().collect();
    if sampler.truncated() {
        return Err(SamplerError::Incomplete {
            samples: samples.len(),
        });
    }
    Ok(samples)
}
