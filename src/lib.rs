//! # scurve-rs
//!
//! Jerk-limited (S-curve) velocity trajectories for motion-controlled axes.
//!
//! - `motion::phase` evaluates a single constant-jerk phase.
//! - `motion::s_curve` plans the concave/linear/convex profile between two
//!   velocities and evaluates it at any elapsed time.
//! - `motion::sampler` walks a profile at a fixed interval until it completes.
//! - `output` writes samples as a table, CSV or JSON lines.
//! - `config` loads all of the above from TOML.

pub mod config;
pub mod motion;
pub mod output;

pub use config::{load_config, Config, ConfigError};
pub use motion::{
    evaluate_phase, evaluate_trajectory, sample_trajectory, Phase, SCurveProfile, Sample,
    SampleResult, Sampler, SamplerConfig, SamplerError, TrajectoryParams,
};
pub use output::{writer_for, OutputError, OutputFormat, SampleWriter};
