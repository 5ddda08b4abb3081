// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Conference simulation driver.
//
// Usage:
//   conference_sim [all|schedule|snacks] [--config sim.toml] [overrides...]
//
// Runs the schedule board (readers-writers) and/or the snack line
// (producer-consumer) and exits non-zero if either run reports lost trays
// or overlapping critical sections.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::EnvFilter;

use confsync::sim::{self, SimConfig, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Module {
    All,
    Schedule,
    Snacks,
}

#[derive(Debug, Parser)]
#[command(name = "conference_sim", about = "Drive the schedule board and snack line simulations")]
struct Cli {
    /// Which simulation to run.
    #[arg(value_enum, default_value_t = Module::All)]
    module: Module,

    /// TOML file with simulation parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Skip every random pause.
    #[arg(long)]
    no_jitter: bool,

    #[arg(long)]
    readers: Option<usize>,

    #[arg(long)]
    writers: Option<usize>,

    #[arg(long)]
    attendees: Option<usize>,

    #[arg(long)]
    cooks: Option<usize>,

    /// Snack counter capacity.
    #[arg(long)]
    capacity: Option<usize>,
}

impl Cli {
    fn sim_config(&self) -> Result<SimConfig, SimError> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if self.no_jitter {
            cfg = cfg.without_jitter();
        }
        if let Some(n) = self.readers {
            cfg.schedule.readers = n;
        }
        if let Some(n) = self.writers {
            cfg.schedule.writers = n;
        }
        if let Some(n) = self.attendees {
            cfg.snacks.attendees = n;
        }
        if let Some(n) = self.cooks {
            cfg.snacks.cooks = n;
        }
        if let Some(n) = self.capacity {
            cfg.snacks.buffer_capacity = n;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn run(cli: &Cli) -> Result<bool, SimError> {
    let cfg = cli.sim_config()?;
    let mut clean = true;

    info!("conference simulation start");
    if matches!(cli.module, Module::All | Module::Schedule) {
        info!("=== readers-writers (schedule board) ===");
        let report = sim::schedule::run(&cfg)?;
        info!(?report, "schedule board closed");
        clean &= report.is_clean();
    }
    if matches!(cli.module, Module::All | Module::Snacks) {
        info!("=== producer-consumer (snacks) ===");
        let report = sim::snacks::run(&cfg)?;
        info!(?report, "snack line closed");
        clean &= report.is_clean();
    }
    info!("conference simulation complete");
    Ok(clean)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(uptime())
        .with_thread_names(true)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("simulation finished with violations");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
