//! # Robodeck Emulator Binary
//!
//! Runs one emulated board until Ctrl-C, logging its reading groups.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (1 s tick) with the built-in presets
//! robodeck_emulator
//!
//! # Custom config, start exploring left, verbose
//! robodeck_emulator --config config/emulator.toml --task 3 -v
//!
//! # JSON logs, report every 10 s
//! robodeck_emulator --json --report-every 10
//! ```

#![deny(warnings)]

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use clap::Parser;
use robodeck_common::prelude::*;
use robodeck_emulator::{EmulatorConfig, ReadingGroup, init_global};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Robodeck Emulator - software stand-in for the robodeck controller board
#[derive(Parser, Debug)]
#[command(name = "robodeck_emulator")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Emulated robodeck board: drifting telemetry, validated presets, task scheduling")]
#[command(long_about = None)]
struct Args {
    /// Path to emulator configuration file (emulator.toml)
    #[arg(short, long, default_value = "/etc/robodeck/emulator.toml")]
    config: PathBuf,

    /// Task code to command at startup (overrides engine.initial_task)
    #[arg(short, long)]
    task: Option<u8>,

    /// Seconds between telemetry reports
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    report_every: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("Emulator startup failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load before tracing so the config can pick the log level. Load
    // failures are logged at the default level.
    let loaded = EmulatorConfig::load(&args.config);
    let (config, missing) = match loaded {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound) => (EmulatorConfig::default(), true),
        Err(e) => {
            setup_tracing(&args, LogLevel::default());
            return Err(e.into());
        }
    };

    setup_tracing(&args, config.shared.log_level);

    info!(
        "Robodeck emulator v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );
    if missing {
        warn!(
            "Config {:?} not found, using built-in defaults",
            args.config
        );
    }
    config.validate()?;

    let robot = init_global(config.engine.clone())?;
    robot.apply_overrides(&config.params);

    match args.task {
        Some(code) => {
            robot.set_robot_task_code(code);
        }
        None => {
            if let Some(task) = config.engine.initial_task {
                robot.set_robot_task(task);
            }
        }
    }

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    })?;

    robot.start_robot()?;

    let report_every = Duration::from_secs(args.report_every.max(1));
    loop {
        match shutdown_rx.recv_timeout(report_every) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                let power = robot.power_reading();
                info!(
                    "Task {:?}/{:?}, battery {:.1}% ({:?}), temp {:.1}C",
                    robot.simple_robot_task(),
                    robot.detailed_robot_task(),
                    power.volts,
                    robot.robot_health(),
                    robot.stm_temp()
                );
                for group in [ReadingGroup::Status, ReadingGroup::Navigation] {
                    let readings = serde_json::to_string(&robot.readings(group))?;
                    info!("Readings {}: {}", group.mapping(), readings);
                }
            }
        }
    }

    robot.stop_robot()?;
    let stats = robot.stats();
    info!(
        "Robodeck emulator shutdown complete ({} ticks, {} overruns)",
        stats.tick_count,
        robot.missed_slow_cycles()
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and config.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.as_directive().parse().unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
