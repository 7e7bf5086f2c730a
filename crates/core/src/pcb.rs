use rand::Rng;
use serde::{Deserialize, Serialize};

/// Process identifier, drawn from `1..=PID_CAPACITY`.
pub type Pid = u32;

/// Size of the PID namespace.
pub const PID_CAPACITY: usize = 100;

/// Number of ready-queue levels.
pub const PRIORITY_LEVELS: usize = 50;

/// Highest priority. Level 0 is the lowest.
pub const MAX_PRIORITY: u8 = (PRIORITY_LEVELS - 1) as u8;

pub const MIN_LIFE: u8 = 1;
pub const MAX_LIFE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "run")]
    Running,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "ready"),
            ProcessState::Running => write!(f, "run"),
        }
    }
}

/// Process control block for one simulated process.
///
/// Queue membership is tracked by the scheduler (queues hold PIDs), so a PCB
/// carries no linkage of its own and snapshots can be freely copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pcb {
    pub id: Pid,
    pub state: ProcessState,
    /// 0..=49, higher runs first.
    pub priority: u8,
    /// Time slices left before the process completes.
    pub remaining_life: u8,
}

impl Pcb {
    /// Build a ready PCB with a uniformly random priority and lifetime.
    pub fn create<R: Rng + ?Sized>(id: Pid, rng: &mut R) -> Self {
        Self {
            id,
            state: ProcessState::Ready,
            priority: rng.gen_range(0..=MAX_PRIORITY),
            remaining_life: rng.gen_range(MIN_LIFE..=MAX_LIFE),
        }
    }

    /// Build a ready PCB with caller-chosen attributes, clamped into range.
    pub fn with_attributes(id: Pid, priority: u8, remaining_life: u8) -> Self {
        Self {
            id,
            state: ProcessState::Ready,
            priority: clamp_priority(priority),
            remaining_life: remaining_life.clamp(MIN_LIFE, MAX_LIFE),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ProcessState::Running
    }
}

impl std::fmt::Display for Pcb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PID: {}, state: {}, priority: {}, life: {}",
            self.id, self.state, self.priority, self.remaining_life
        )
    }
}

/// Clamp a priority into `0..=MAX_PRIORITY`.
pub fn clamp_priority(priority: u8) -> u8 {
    priority.min(MAX_PRIORITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn create_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 1..=500 {
            let pcb = Pcb::create(id, &mut rng);
            assert_eq!(pcb.id, id);
            assert_eq!(pcb.state, ProcessState::Ready);
            assert!(pcb.priority <= MAX_PRIORITY);
            assert!((MIN_LIFE..=MAX_LIFE).contains(&pcb.remaining_life));
        }
    }

    #[test]
    fn create_covers_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        let pcbs: Vec<Pcb> = (0..5000).map(|_| Pcb::create(1, &mut rng)).collect();
        assert!(pcbs.iter().any(|p| p.priority == 0));
        assert!(pcbs.iter().any(|p| p.priority == MAX_PRIORITY));
        assert!(pcbs.iter().any(|p| p.remaining_life == MIN_LIFE));
        assert!(pcbs.iter().any(|p| p.remaining_life == MAX_LIFE));
    }

    #[test]
    fn with_attributes_clamps() {
        let pcb = Pcb::with_attributes(3, 200, 0);
        assert_eq!(pcb.priority, 49);
        assert_eq!(pcb.remaining_life, 1);

        let pcb = Pcb::with_attributes(3, 10, 9);
        assert_eq!(pcb.priority, 10);
        assert_eq!(pcb.remaining_life, 5);
    }

    #[test]
    fn display_format() {
        let mut pcb = Pcb::with_attributes(12, 30, 4);
        assert_eq!(pcb.to_string(), "PID: 12, state: ready, priority: 30, life: 4");
        pcb.state = ProcessState::Running;
        assert_eq!(pcb.to_string(), "PID: 12, state: run, priority: 30, life: 4");
    }

    #[test]
    fn state_serializes_as_label() {
        let json = serde_json::to_string(&ProcessState::Running).unwrap();
        assert_eq!(json, "\"run\"");
        let pcb = Pcb::with_attributes(1, 5, 2);
        let value = serde_json::to_value(pcb).unwrap();
        assert_eq!(value["state"], "ready");
        assert_eq!(value["priority"], 5);
    }
}
