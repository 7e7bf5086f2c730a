use serde::Serialize;

/// Scheduler counters exposed to the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerMetrics {
    /// Processes successfully created.
    pub created: u64,
    /// Creation requests dropped because the PID namespace was full.
    pub rejected: u64,
    /// Scheduling decisions that selected a process.
    pub dispatched: u64,
    /// Scheduling decisions that found every queue empty.
    pub idle: u64,
    /// Time slices reported back by the driver.
    pub time_slices: u64,
    /// Processes that ran out of life and were destroyed.
    pub completed: u64,
    /// Highest number of simultaneously live processes.
    pub peak_live: usize,
}

impl SchedulerMetrics {
    pub(crate) fn record_created(&mut self, live: usize) {
        self.created += 1;
        self.peak_live = self.peak_live.max(live);
    }

    pub(crate) fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    pub(crate) fn record_decision(&mut self, dispatched: bool) {
        if dispatched {
            self.dispatched += 1;
        } else {
            self.idle += 1;
        }
    }

    pub(crate) fn record_time_slice(&mut self, completed: bool) {
        self.time_slices += 1;
        if completed {
            self.completed += 1;
        }
    }

    /// Processes created but not yet completed.
    pub fn live(&self) -> u64 {
        self.created.saturating_sub(self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics() {
        let m = SchedulerMetrics::default();
        assert_eq!(m.created, 0);
        assert_eq!(m.peak_live, 0);
        assert_eq!(m.live(), 0);
    }

    #[test]
    fn peak_tracks_maximum() {
        let mut m = SchedulerMetrics::default();
        m.record_created(1);
        m.record_created(2);
        m.record_time_slice(true);
        m.record_created(2);

        assert_eq!(m.created, 3);
        assert_eq!(m.completed, 1);
        assert_eq!(m.peak_live, 2);
        assert_eq!(m.live(), 2);
    }

    #[test]
    fn decisions_split_dispatch_and_idle() {
        let mut m = SchedulerMetrics::default();
        m.record_decision(true);
        m.record_decision(false);
        m.record_decision(false);
        m.record_time_slice(false);

        assert_eq!(m.dispatched, 1);
        assert_eq!(m.idle, 2);
        assert_eq!(m.time_slices, 1);
        assert_eq!(m.completed, 0);
    }

    #[test]
    fn live_never_underflows() {
        let m = SchedulerMetrics {
            created: 1,
            completed: 3,
            ..Default::default()
        };
        assert_eq!(m.live(), 0);
    }
}
