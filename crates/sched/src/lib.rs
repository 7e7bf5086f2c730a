pub mod scheduler;

pub use mlfq_core::{Pcb, Pid, ProcessState, SchedError};
pub use scheduler::{QueueStatus, Scheduler, SchedulerMetrics};
