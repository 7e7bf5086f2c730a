use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mlfq_core::{Pcb, Pid, PID_CAPACITY};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::scheduler::metrics::SchedulerMetrics;
use crate::scheduler::pid::PidTable;
use crate::scheduler::queues::ReadyQueues;
use crate::scheduler::types::QueueStatus;

/// Everything guarded by the scheduler lock.
pub(super) struct SchedState {
    pub(super) pids: PidTable,
    pub(super) queues: ReadyQueues,
    /// Live PCBs, slot = PID - 1.
    pub(super) arena: Vec<Option<Pcb>>,
    /// Live PIDs in creation order.
    pub(super) roster: Vec<Pid>,
    pub(super) running: Option<Pid>,
    pub(super) rng: StdRng,
    pub(super) metrics: SchedulerMetrics,
}

impl SchedState {
    fn new(rng: StdRng) -> Self {
        Self {
            pids: PidTable::new(),
            queues: ReadyQueues::new(),
            arena: vec![None; PID_CAPACITY],
            roster: Vec::new(),
            running: None,
            rng,
            metrics: SchedulerMetrics::default(),
        }
    }

    pub(super) fn pcb(&self, pid: Pid) -> Option<&Pcb> {
        PidTable::slot(pid).and_then(|slot| self.arena[slot].as_ref())
    }

    pub(super) fn pcb_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
        PidTable::slot(pid).and_then(|slot| self.arena[slot].as_mut())
    }
}

/// The MLFQ scheduler. Share it between threads behind an [`Arc`].
pub struct Scheduler {
    pub(super) state: Mutex<SchedState>,
    /// Quit flag, independent of the scheduler lock.
    pub(super) quit: Arc<AtomicBool>,
}

impl Scheduler {
    /// Create a scheduler whose process attributes come from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a scheduler with a reproducible attribute sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            state: Mutex::new(SchedState::new(rng)),
            quit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// No operation panics between mutations, so a poisoned guard still holds
    /// consistent state.
    pub(super) fn lock(&self) -> MutexGuard<'_, SchedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every live process in creation order.
    pub fn get_all_processes(&self) -> Vec<Pcb> {
        let state = self.lock();
        state
            .roster
            .iter()
            .filter_map(|pid| state.pcb(*pid).copied())
            .collect()
    }

    /// Copy of the running process, if any.
    pub fn running(&self) -> Option<Pcb> {
        let state = self.lock();
        state.running.and_then(|pid| state.pcb(pid).copied())
    }

    pub fn queue_status(&self) -> QueueStatus {
        let state = self.lock();
        QueueStatus {
            depths: state.queues.depths(),
            total_ready: state.queues.len(),
            running: state.running,
        }
    }

    pub fn metrics(&self) -> SchedulerMetrics {
        self.lock().metrics.clone()
    }

    /// Whether `pid` is free for the next creation.
    pub fn is_pid_available(&self, pid: Pid) -> bool {
        self.lock().pids.is_available(pid)
    }

    /// Signal the driver loop to stop (or clear a previous signal).
    pub fn set_quit(&self, quit: bool) {
        if quit {
            info!("Scheduler quit requested");
        }
        self.quit.store(quit, Ordering::SeqCst);
    }

    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    /// Get an Arc to the quit flag (for tasks that outlive a borrow).
    pub fn shutdown_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
