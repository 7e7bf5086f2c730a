use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Bounded log of recent operations, newest first.
#[derive(Debug)]
pub struct OpLog {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl OpLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, entry: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(entry.into());
        entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}
