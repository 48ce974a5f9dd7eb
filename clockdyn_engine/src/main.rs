//! # clockdyn
//!
//! Runs the three clock hands against the local wall clock and streams
//! their simulated angles. Hands can be pushed by typing short commands on
//! stdin (see [`clockdyn_engine::input`]).

use clap::{Parser, ValueEnum};
use clockdyn_common::clock::{ClockConfig, Preset};
use clockdyn_common::config::LogLevel;
use clockdyn_engine::config::{resolve_config, ConfigOverrides};
use clockdyn_engine::driver::ClockDriver;
use clockdyn_engine::input::{spawn_line_reader, USAGE_HINT};
use clockdyn_engine::reference::WallClockSource;
use clockdyn_engine::render::{HandRenderer, JsonLinesRenderer, LogRenderer, NullRenderer};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Built-in clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// Sweeping second hand, stepping minute hand.
    Continuous,
    /// Ticking second hand, continuous minute hand.
    Stepping,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Continuous => Preset::Continuous,
            PresetArg::Stepping => Preset::Stepping,
        }
    }
}

/// Where hand angles go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    /// One JSON object per tick on stdout.
    Jsonl,
    /// One log line per tick.
    Log,
    /// Discard (timing runs).
    #[value(name = "none")]
    Discard,
}

/// clockdyn: damped clock hand simulator
#[derive(Parser, Debug)]
#[command(name = "clockdyn")]
#[command(version)]
#[command(about = "Clock hands simulated as damped second-order systems")]
struct Args {
    /// Clock configuration TOML. Overrides --preset.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in tuning used when no file is given.
    #[arg(long, value_enum, default_value_t = PresetArg::Continuous)]
    preset: PresetArg,

    /// Hands follow the reference exactly (no spring-damper).
    #[arg(long)]
    no_dynamics: bool,

    /// Stop after this many ticks (default: run until Ctrl-C).
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// Angle output sink.
    #[arg(long, value_enum, default_value_t = OutputArg::Jsonl)]
    output: OutputArg,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let overrides = ConfigOverrides {
        disable_dynamics: args.no_dynamics,
    };
    let config = resolve_config(args.config.as_deref(), args.preset.into(), overrides);

    let level = match &config {
        Ok(c) => c.shared.log_level,
        Err(_) => LogLevel::default(),
    };
    setup_tracing(&args, level);

    info!("clockdyn v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|c| run(&args, &c));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("clockdyn shutdown complete");
}

fn run(args: &Args, config: &ClockConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Config OK: service={}, T={} s, dynamics={}",
        config.shared.service_name,
        config.simulation.sampling_period,
        config.simulation.enable_dynamics
    );

    // Logs go to stderr so stdout carries only frames.
    let renderer: Box<dyn HandRenderer> = match args.output {
        OutputArg::Jsonl => Box::new(JsonLinesRenderer::new(io::BufWriter::new(io::stdout()))),
        OutputArg::Log => Box::new(LogRenderer),
        OutputArg::Discard => Box::new(NullRenderer),
    };

    let source = WallClockSource::new(&config.motion);
    let mut driver = ClockDriver::new(config, source, renderer)?;

    if driver.accepts_perturbations() {
        info!("{USAGE_HINT}");
    }
    spawn_line_reader(BufReader::new(io::stdin()), driver.inbox().clone())?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    driver.run(&running, args.ticks)?;
    Ok(())
}

fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}
