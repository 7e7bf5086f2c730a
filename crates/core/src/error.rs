use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    /// Every PID in the namespace belongs to a live process.
    #[error("no PID available (all {capacity} in use)")]
    ResourceExhausted { capacity: usize },
}

pub type Result<T> = std::result::Result<T, SchedError>;
