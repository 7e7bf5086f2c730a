use mlfq_core::{Pcb, ProcessState, Result, SchedError, PID_CAPACITY};
use tracing::{debug, info, warn};

use crate::scheduler::pid::PidTable;

use super::core::SchedState;
use super::Scheduler;

impl Scheduler {
    /// Create a process with random priority and lifetime on the lowest free PID.
    pub fn create_process(&self) -> Result<Pcb> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(id) = state.pids.allocate() else {
            return Self::reject(state);
        };
        let pcb = Pcb::create(id, &mut state.rng);
        Ok(Self::enqueue_new(state, pcb))
    }

    /// Create a process with the given attributes (clamped into range).
    pub fn create_process_with(&self, priority: u8, remaining_life: u8) -> Result<Pcb> {
        let mut state = self.lock();
        let Some(id) = state.pids.allocate() else {
            return Self::reject(&mut state);
        };
        let pcb = Pcb::with_attributes(id, priority, remaining_life);
        Ok(Self::enqueue_new(&mut state, pcb))
    }

    /// Dispatch the head of the highest non-empty ready queue.
    ///
    /// A process still marked running from an unreported slice goes back to
    /// the head of its level unchanged before the pick. Returns `None` when
    /// every queue is empty; the running slot is cleared in that case.
    pub fn schedule_process(&self) -> Option<Pcb> {
        let mut state = self.lock();
        if let Some(prev) = state.running.take() {
            if let Some(pcb) = state.pcb(prev).copied() {
                Self::add_to_ready_queue(&mut state, pcb);
                debug!(pid = prev, "preempted without a reported slice, re-queued");
            }
        }
        let Some((level, pid)) = state.queues.pop_highest() else {
            state.running = None;
            state.metrics.record_decision(false);
            return None;
        };

        state.running = Some(pid);
        state.metrics.record_decision(true);
        let pcb = state.pcb_mut(pid).map(|pcb| {
            pcb.state = ProcessState::Running;
            *pcb
        });
        debug!(pid, priority = level, "dispatched");
        pcb
    }

    /// Account one finished time slice for the running process.
    ///
    /// Priority is halved and life decremented. A process whose life reaches
    /// zero is destroyed and its PID released; otherwise it goes back to the
    /// head of its new priority level. No-op when nothing is running.
    pub fn process_finished_time_slice(&self) {
        let mut state = self.lock();
        let Some(pid) = state.running.take() else {
            return;
        };
        let Some(pcb) = state.pcb_mut(pid) else {
            return;
        };

        let old_priority = pcb.priority;
        pcb.priority /= 2;
        pcb.remaining_life = pcb.remaining_life.saturating_sub(1);
        let finished = *pcb;

        if finished.remaining_life == 0 {
            Self::destroy(&mut state, finished);
            state.metrics.record_time_slice(true);
            info!(pid, "process completed, PID released");
        } else {
            Self::add_to_ready_queue(&mut state, finished);
            state.metrics.record_time_slice(false);
            debug!(
                pid,
                priority_from = old_priority,
                priority_to = finished.priority,
                life = finished.remaining_life,
                "re-queued"
            );
        }
    }

    // ── internal helpers ────────────────────────────────────────

    fn enqueue_new(state: &mut SchedState, pcb: Pcb) -> Pcb {
        let pcb = Self::add_to_ready_queue(state, pcb);
        state.roster.push(pcb.id);
        debug_assert_eq!(state.pids.in_use(), state.roster.len());
        state.metrics.record_created(state.roster.len());
        info!(
            pid = pcb.id,
            priority = pcb.priority,
            life = pcb.remaining_life,
            "process created"
        );
        pcb
    }

    fn reject(state: &mut SchedState) -> Result<Pcb> {
        state.metrics.record_rejected();
        warn!(capacity = PID_CAPACITY, "no PID available, creation dropped");
        Err(SchedError::ResourceExhausted {
            capacity: PID_CAPACITY,
        })
    }

    /// Clamp, mark ready, store in the arena and push onto its level's head.
    fn add_to_ready_queue(state: &mut SchedState, mut pcb: Pcb) -> Pcb {
        debug_assert!(!state.queues.contains(pcb.id));
        pcb.state = ProcessState::Ready;
        pcb.priority = state.queues.push(pcb.priority, pcb.id);
        if let Some(slot) = PidTable::slot(pcb.id) {
            state.arena[slot] = Some(pcb);
        }
        pcb
    }

    fn destroy(state: &mut SchedState, pcb: Pcb) {
        if let Some(slot) = PidTable::slot(pcb.id) {
            state.arena[slot] = None;
        }
        state.roster.retain(|pid| *pid != pcb.id);
        state.pids.release(pcb.id);
    }
}
