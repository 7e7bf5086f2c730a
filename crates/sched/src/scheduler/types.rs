use mlfq_core::Pid;
use serde::Serialize;

/// Snapshot of ready-queue occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    /// Queue length per priority level, index = priority.
    pub depths: Vec<usize>,
    /// Sum of all queue lengths.
    pub total_ready: usize,
    /// PID of the running process, if any.
    pub running: Option<Pid>,
}

impl QueueStatus {
    /// Up to `limit` non-empty levels as `(priority, len)`, highest priority first.
    pub fn top_levels(&self, limit: usize) -> Vec<(u8, usize)> {
        self.depths
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, len)| **len > 0)
            .take(limit)
            .map(|(level, len)| (level as u8, *len))
            .collect()
    }

    /// Highest non-empty level.
    pub fn highest_ready(&self) -> Option<u8> {
        self.top_levels(1).first().map(|(level, _)| *level)
    }
}
