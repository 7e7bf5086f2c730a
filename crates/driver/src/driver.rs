//! The scheduling loop. All simulated time lives here; the scheduler is
//! only told when a slice has ended.

use std::sync::Arc;
use std::time::Duration;

use mlfq_core::config::TimingConfig;
use mlfq_core::Pcb;
use mlfq_sched::Scheduler;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::command;
use crate::oplog::OpLog;
use crate::render;

/// Counters for one run of the scheduling loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub slices: u64,
    pub completed: u64,
    pub idle_polls: u64,
    /// Slices cut short because quit was requested mid-countdown.
    pub interrupted: u64,
}

pub struct Driver {
    scheduler: Arc<Scheduler>,
    timing: TimingConfig,
    oplog: Arc<OpLog>,
    watch: Option<OutputFormat>,
}

impl Driver {
    pub fn new(scheduler: Arc<Scheduler>, timing: TimingConfig, oplog: Arc<OpLog>) -> Self {
        Self {
            scheduler,
            timing,
            oplog,
            watch: None,
        }
    }

    /// Print the roster after every slice in the given format.
    pub fn watch(mut self, format: OutputFormat) -> Self {
        self.watch = Some(format);
        self
    }

    /// Run until quit is requested. Quit is checked between steps and on
    /// every countdown tick; a started slice is always reported back.
    pub async fn run_loop(&self) -> LoopStats {
        let mut stats = LoopStats::default();
        info!(
            time_slice_ms = self.timing.time_slice_ms,
            tick_ms = self.timing.tick_ms,
            "scheduling loop started"
        );

        while !self.scheduler.should_quit() {
            match self.scheduler.schedule_process() {
                Some(pcb) => {
                    self.oplog.push(format!(
                        "running PID={} priority={} life={}",
                        pcb.id, pcb.priority, pcb.remaining_life
                    ));
                    if !self.count_down().await {
                        stats.interrupted += 1;
                    }
                    if self.finish_slice(pcb) {
                        stats.completed += 1;
                    }
                    stats.slices += 1;
                    self.show_roster();
                }
                None => {
                    stats.idle_polls += 1;
                    debug!("no ready process, idling");
                    sleep(self.timing.idle_wait()).await;
                }
            }
        }

        info!(
            slices = stats.slices,
            completed = stats.completed,
            "scheduling loop stopped"
        );
        stats
    }

    /// Sleep through one time slice in ticks. Returns false if quit cut it short.
    async fn count_down(&self) -> bool {
        let deadline = Instant::now() + self.timing.time_slice();
        loop {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            sleep(self.timing.tick().min(deadline - now)).await;
            if self.scheduler.should_quit() {
                return false;
            }
        }
    }

    /// Report the slice and log the outcome. Returns true if the process completed.
    fn finish_slice(&self, pcb: Pcb) -> bool {
        self.scheduler.process_finished_time_slice();
        if pcb.remaining_life > 1 {
            let line = format!(
                "PID={} slice done: priority {}→{}, life {}→{}, back to ready",
                pcb.id,
                pcb.priority,
                pcb.priority / 2,
                pcb.remaining_life,
                pcb.remaining_life - 1
            );
            info!("{}", line);
            self.oplog.push(line);
            false
        } else {
            let line = format!("PID={} finished, PCB released", pcb.id);
            info!("{}", line);
            self.oplog.push(line);
            true
        }
    }

    fn show_roster(&self) {
        let Some(format) = self.watch else {
            return;
        };
        match render::roster(&self.scheduler.get_all_processes(), format) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::warn!(error = %e, "failed to render roster"),
        }
    }
}

/// Create one process per `interval` until quit.
pub async fn auto_spawn(scheduler: Arc<Scheduler>, interval: Duration, oplog: Arc<OpLog>) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately.
    ticker.tick().await;
    while !scheduler.should_quit() {
        ticker.tick().await;
        if scheduler.should_quit() {
            break;
        }
        command::seed_processes(&scheduler, 1, &oplog);
    }
    debug!("auto-spawn stopped");
}
