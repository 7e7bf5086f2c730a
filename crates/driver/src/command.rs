use anyhow::{bail, Context, Result};
use mlfq_sched::Scheduler;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::oplog::OpLog;
use crate::render;

pub const HELP: &str = "\
commands:
  new | n                   create a process with random priority and life
  spawn <priority> <life>   create a process with the given attributes
  ps | list                 show all processes
  queues                    show the busiest ready queues
  stats                     show scheduler counters
  log                       show recent operations
  help                      show this message
  quit | q                  stop after the current time slice";

/// A request from the terminal, translated into scheduler calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Spawn { priority: u8, life: u8 },
    List,
    Queues,
    Stats,
    Log,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(None);
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "new" | "n" => Command::New,
            "spawn" => {
                let priority = parts
                    .next()
                    .context("spawn needs <priority> <life>")?
                    .parse()
                    .context("priority must be 0-255")?;
                let life = parts
                    .next()
                    .context("spawn needs <priority> <life>")?
                    .parse()
                    .context("life must be 0-255")?;
                Command::Spawn { priority, life }
            }
            "ps" | "list" => Command::List,
            "queues" => Command::Queues,
            "stats" => Command::Stats,
            "log" => Command::Log,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command: {}", other),
        };
        if parts.next().is_some() {
            bail!("unexpected arguments after '{}'", word);
        }
        Ok(Some(command))
    }
}

/// Apply a command and return text to print, if any.
pub fn execute(
    scheduler: &Scheduler,
    command: Command,
    oplog: &OpLog,
    format: OutputFormat,
) -> Result<Option<String>> {
    let output = match command {
        Command::New => Some(record_creation(oplog, scheduler.create_process())),
        Command::Spawn { priority, life } => Some(record_creation(
            oplog,
            scheduler.create_process_with(priority, life),
        )),
        Command::List => Some(render::roster(&scheduler.get_all_processes(), format)?),
        Command::Queues => Some(render::queues(&scheduler.queue_status(), format)?),
        Command::Stats => Some(render::metrics(&scheduler.metrics(), format)?),
        Command::Log => Some(oplog.entries().join("\n")),
        Command::Help => Some(HELP.to_string()),
        Command::Quit => {
            scheduler.set_quit(true);
            oplog.push("quit requested");
            None
        }
    };
    Ok(output)
}

fn record_creation(oplog: &OpLog, result: mlfq_core::Result<mlfq_core::Pcb>) -> String {
    match result {
        Ok(pcb) => {
            let line = format!(
                "created PID={} priority={} life={}",
                pcb.id, pcb.priority, pcb.remaining_life
            );
            oplog.push(line.clone());
            line
        }
        Err(e) => {
            warn!(error = %e, "process creation dropped");
            let line = format!("creation failed: {}", e);
            oplog.push(line.clone());
            line
        }
    }
}

/// Create the startup processes, logging (not failing) on exhaustion.
pub fn seed_processes(scheduler: &Scheduler, count: usize, oplog: &OpLog) {
    for _ in 0..count {
        record_creation(oplog, scheduler.create_process());
    }
    info!(count, live = scheduler.get_all_processes().len(), "initial processes created");
}
