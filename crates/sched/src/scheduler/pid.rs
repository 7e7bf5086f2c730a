use mlfq_core::{Pid, PID_CAPACITY};

/// Fixed-capacity PID availability table. Slot `i` tracks PID `i + 1`.
#[derive(Debug, Clone)]
pub(crate) struct PidTable {
    available: [bool; PID_CAPACITY],
}

impl PidTable {
    pub(crate) fn new() -> Self {
        Self {
            available: [true; PID_CAPACITY],
        }
    }

    /// Claim the lowest available PID.
    pub(crate) fn allocate(&mut self) -> Option<Pid> {
        let slot = self.available.iter().position(|free| *free)?;
        self.available[slot] = false;
        Some(slot as Pid + 1)
    }

    /// Return a PID to the pool. Out-of-range PIDs are ignored.
    pub(crate) fn release(&mut self, pid: Pid) {
        if let Some(slot) = Self::slot(pid) {
            self.available[slot] = true;
        }
    }

    pub(crate) fn is_available(&self, pid: Pid) -> bool {
        Self::slot(pid).is_some_and(|slot| self.available[slot])
    }

    pub(crate) fn in_use(&self) -> usize {
        self.available.iter().filter(|free| !**free).count()
    }

    pub(crate) fn slot(pid: Pid) -> Option<usize> {
        let slot = (pid as usize).checked_sub(1)?;
        (slot < PID_CAPACITY).then_some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_lowest_first() {
        let mut table = PidTable::new();
        assert_eq!(table.allocate(), Some(1));
        assert_eq!(table.allocate(), Some(2));
        assert_eq!(table.allocate(), Some(3));

        table.release(2);
        assert!(table.is_available(2));
        assert_eq!(table.allocate(), Some(2));
        assert_eq!(table.allocate(), Some(4));
    }

    #[test]
    fn exhausts_at_capacity() {
        let mut table = PidTable::new();
        for expected in 1..=PID_CAPACITY as Pid {
            assert_eq!(table.allocate(), Some(expected));
        }
        assert_eq!(table.in_use(), PID_CAPACITY);
        assert_eq!(table.allocate(), None);

        table.release(100);
        assert_eq!(table.allocate(), Some(100));
    }

    #[test]
    fn out_of_range_pids() {
        let mut table = PidTable::new();
        assert!(!table.is_available(0));
        assert!(!table.is_available(101));
        table.release(0);
        table.release(500);
        assert_eq!(table.in_use(), 0);
        assert_eq!(PidTable::slot(1), Some(0));
        assert_eq!(PidTable::slot(100), Some(99));
        assert_eq!(PidTable::slot(101), None);
    }
}
