// src/motion/mod.rs - S-curve trajectory kernel and sampling

pub mod phase;
pub mod s_curve;
pub mod sampler;

pub use phase::{evaluate_phase, Phase, PhaseSegment};
pub use s_curve::{evaluate_trajectory, SCurveProfile, SampleResult, TrajectoryParams};
pub use sampler::{sample_trajectory, Sample, Sampler, SamplerConfig, SamplerError};
