//! Terminal input: a blocking stdin reader feeding an async command loop.

use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use mlfq_sched::Scheduler;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::cli::OutputFormat;
use crate::command::{self, Command};
use crate::oplog::OpLog;

/// Pending input lines buffered between the reader thread and the command loop.
pub const INPUT_BUFFER: usize = 10;

/// Read stdin lines on a plain thread so a pending read never holds up
/// runtime shutdown. The sender is dropped on EOF.
pub fn spawn_stdin_reader(tx: mpsc::Sender<String>) -> Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            debug!("stdin closed");
        })
        .context("failed to spawn stdin reader thread")?;
    Ok(())
}

/// Translate input lines into scheduler calls until quit or end of input.
pub async fn run_commands(
    scheduler: Arc<Scheduler>,
    mut rx: mpsc::Receiver<String>,
    oplog: Arc<OpLog>,
    format: OutputFormat,
) {
    while let Some(line) = rx.recv().await {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(input = %line.trim(), "{:#}", e);
                continue;
            }
        };

        match command::execute(&scheduler, command, &oplog, format) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => error!("{:#}", e),
        }

        if command == Command::Quit {
            return;
        }
    }

    // End of input means nobody can ask us to stop any more.
    debug!("input closed, requesting quit");
    scheduler.set_quit(true);
}
