// src/main.rs - Sample an S-curve velocity trajectory and print it
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use scurve_rs::config::{self, Config, LimitConvention};
use scurve_rs::{writer_for, OutputFormat, SCurveProfile, Sampler, SamplerError};

/// S-curve trajectory sampler
#[derive(Parser, Debug)]
#[command(name = "scurve-sample", about = "Sample a jerk-limited velocity trajectory until it completes.")]
struct Cli {
    /// Path to a TOML config file (overrides defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start velocity
    #[arg(long, allow_hyphen_values = true)]
    v_start: Option<f64>,

    /// Target velocity
    #[arg(long, allow_hyphen_values = true)]
    v_target: Option<f64>,

    /// Acceleration limit (negative unless --magnitude)
    #[arg(long, allow_hyphen_values = true)]
    a_limit: Option<f64>,

    /// Jerk limit (negative unless --magnitude)
    #[arg(long, allow_hyphen_values = true)]
    j_limit: Option<f64>,

    /// Treat --a-limit/--j-limit as positive magnitudes
    #[arg(long)]
    magnitude: bool,

    /// Time between samples
    #[arg(short, long)]
    interval: Option<f64>,

    /// Give up after this many samples
    #[arg(long)]
    max_samples: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places in table output
    #[arg(short, long)]
    precision: Option<usize>,

    /// Write samples to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        let trajectory = &mut config.trajectory;
        if let Some(v) = self.v_start { trajectory.v_start = v; }
        if let Some(v) = self.v_target { trajectory.v_target = v; }
        if let Some(a) = self.a_limit { trajectory.a_limit = a; }
        if let Some(j) = self.j_limit { trajectory.j_limit = j; }
        if self.magnitude {
            trajectory.convention = LimitConvention::Magnitude;
        }
        if let Some(interval) = self.interval { config.sampler.interval = interval; }
        if let Some(max) = self.max_samples { config.sampler.max_samples = max; }
        if let Some(format) = self.format { config.output.format = format; }
        if let Some(precision) = self.precision { config.output.precision = precision; }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(&path)?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    let params = config.trajectory.params();
    let profile = SCurveProfile::plan(params);
    match profile.duration() {
        Some(duration) => tracing::info!(
            "Trajectory {} -> {}: {:.3} time units, peak acceleration {:.3}",
            params.v_start,
            params.v_target,
            duration,
            profile.peak_acceleration().unwrap_or(0.0)
        ),
        None => tracing::info!(
            "Trajectory {} -> {} has nothing to do, holding start velocity",
            params.v_start,
            params.v_target
        ),
    }

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = writer_for(config.output.format, config.output.precision, sink);

    let mut sampler = Sampler::new(profile, &config.sampler)?;
    for sample in sampler.by_ref() {
        writer.write_sample(&sample)?;
    }
    writer.finish()?;

    if sampler.truncated() {
        let err = SamplerError::Incomplete { samples: sampler.emitted() };
        tracing::error!("{}", err);
        return Err(err.into());
    }
    tracing::info!("Wrote {} samples", sampler.emitted());
    Ok(())
}
