//! Scheduler runner -- process lifecycle and dispatch under one lock.
//!
//! Split into focused submodules:
//! - `core`: Scheduler struct, locked state, snapshots and the quit flag
//! - `dispatch`: process creation, scheduling decision and time-slice bookkeeping

mod core;
mod dispatch;

pub use self::core::Scheduler;
