use std::collections::VecDeque;

use mlfq_core::{clamp_priority, Pid, PRIORITY_LEVELS};

/// One ready queue per priority level, holding PIDs.
///
/// Insertion and removal both happen at the front, so within a level the
/// most recently enqueued process is selected first.
#[derive(Debug, Clone)]
pub(crate) struct ReadyQueues {
    levels: [VecDeque<Pid>; PRIORITY_LEVELS],
}

impl ReadyQueues {
    pub(crate) fn new() -> Self {
        Self {
            levels: std::array::from_fn(|_| VecDeque::new()),
        }
    }

    /// Enqueue at the head of the (clamped) level. Returns the level used.
    pub(crate) fn push(&mut self, priority: u8, pid: Pid) -> u8 {
        let level = clamp_priority(priority);
        self.levels[level as usize].push_front(pid);
        level
    }

    /// Dequeue the head of the highest non-empty level.
    pub(crate) fn pop_highest(&mut self) -> Option<(u8, Pid)> {
        self.levels
            .iter_mut()
            .enumerate()
            .rev()
            .find_map(|(level, queue)| queue.pop_front().map(|pid| (level as u8, pid)))
    }

    pub(crate) fn depths(&self) -> Vec<usize> {
        self.levels.iter().map(VecDeque::len).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }

    pub(crate) fn contains(&self, pid: Pid) -> bool {
        self.levels.iter().any(|q| q.contains(&pid))
    }
}
