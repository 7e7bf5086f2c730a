//! Multi-level feedback queue scheduler over simulated processes.
//!
//! The [`Scheduler`] owns 50 ready queues (one per priority level), the
//! fixed PID namespace, the running process and the live-process roster.
//! Every operation takes a single internal lock for its whole duration, so
//! callers on different threads observe a total order of operations.
//!
//! The scheduler has no notion of time. A driver decides how long a time
//! slice lasts and reports back through
//! [`Scheduler::process_finished_time_slice`].

pub mod metrics;
pub(crate) mod pid;
pub(crate) mod queues;
pub mod runner;
pub mod types;

pub use metrics::SchedulerMetrics;
pub use runner::Scheduler;
pub use types::QueueStatus;
