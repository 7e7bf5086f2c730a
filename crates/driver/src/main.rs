//! mlfq-driver — terminal front end for the MLFQ scheduler simulation.
//!
//! Owns everything the scheduler deliberately does not: simulated time,
//! input handling and rendering.
//!
//! Tasks:
//! - scheduling loop (dispatch, count down a slice, report it back)
//! - command loop fed by a stdin reader thread
//! - optional auto-spawner
//! - Ctrl+C watcher that sets the quit flag

mod cli;
mod command;
mod driver;
mod input;
mod oplog;
mod render;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};

use mlfq_core::config::{load_dotenv, Config};
use mlfq_sched::Scheduler;

use crate::cli::CliArgs;
use crate::driver::Driver;
use crate::oplog::OpLog;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let mut config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    args.apply(&mut config);
    config.log_summary();

    let scheduler = Arc::new(match config.workload.seed {
        Some(seed) => Scheduler::with_seed(seed),
        None => Scheduler::new(),
    });
    let oplog = Arc::new(OpLog::new(config.workload.op_log_capacity));

    command::seed_processes(&scheduler, config.workload.initial_processes, &oplog);
    println!("{}", command::HELP);

    // Input
    let (tx, rx) = mpsc::channel(input::INPUT_BUFFER);
    input::spawn_stdin_reader(tx)?;
    let commands = tokio::spawn(input::run_commands(
        Arc::clone(&scheduler),
        rx,
        Arc::clone(&oplog),
        args.format,
    ));

    // Ctrl+C
    {
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl+C received");
                    scheduler.set_quit(true);
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl+C"),
            }
        });
    }

    if let Some(interval) = config.workload.spawn_interval() {
        info!(interval_ms = config.workload.spawn_interval_ms, "auto-spawn enabled");
        tokio::spawn(driver::auto_spawn(
            Arc::clone(&scheduler),
            interval,
            Arc::clone(&oplog),
        ));
    }

    let mut driver = Driver::new(Arc::clone(&scheduler), config.timing.clone(), Arc::clone(&oplog));
    if args.watch {
        driver = driver.watch(args.format);
    }
    let stats = driver.run_loop().await;
    commands.abort();

    let metrics = scheduler.metrics();
    info!(
        slices = stats.slices,
        completed = stats.completed,
        interrupted = stats.interrupted,
        idle_polls = stats.idle_polls,
        live = scheduler.get_all_processes().len(),
        "simulation stopped"
    );
    println!("{}", render::metrics(&metrics, args.format)?);

    Ok(())
}
