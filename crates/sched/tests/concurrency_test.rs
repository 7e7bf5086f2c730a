//! Integration tests for concurrent access to the scheduler.
//!
//! One thread plays the display (creating processes and polling snapshots)
//! while another runs the dispatch/time-slice loop, as the driver does.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use mlfq_sched::{Pid, ProcessState, SchedError, Scheduler};

const PID_CAPACITY: usize = 100;

#[test]
fn concurrent_creators_never_share_a_pid() {
    let scheduler = Arc::new(Scheduler::with_seed(21));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scheduler = Arc::clone(&scheduler);
            thread::spawn(move || {
                let mut ok = Vec::new();
                let mut rejected = 0;
                for _ in 0..40 {
                    match scheduler.create_process() {
                        Ok(pcb) => ok.push(pcb.id),
                        Err(SchedError::ResourceExhausted { .. }) => rejected += 1,
                    }
                }
                (ok, rejected)
            })
        })
        .collect();

    let mut all = Vec::new();
    let mut rejected = 0;
    for handle in handles {
        let (ok, r) = handle.join().unwrap();
        all.extend(ok);
        rejected += r;
    }

    let unique: HashSet<Pid> = all.iter().copied().collect();
    assert_eq!(all.len(), PID_CAPACITY);
    assert_eq!(unique.len(), PID_CAPACITY);
    assert!(unique.iter().all(|pid| (1..=100).contains(pid)));
    assert_eq!(rejected, 160 - PID_CAPACITY);
    assert_eq!(scheduler.metrics().rejected, rejected as u64);
}

#[test]
fn display_and_scheduler_threads_drain_cleanly() {
    let scheduler = Arc::new(Scheduler::with_seed(22));
    for _ in 0..5 {
        scheduler.create_process().unwrap();
    }

    let loop_handle = {
        let scheduler = Arc::clone(&scheduler);
        thread::spawn(move || {
            let mut slices = 0u64;
            while !scheduler.should_quit() || scheduler.queue_status().total_ready > 0 {
                if scheduler.schedule_process().is_some() {
                    scheduler.process_finished_time_slice();
                    slices += 1;
                } else {
                    thread::yield_now();
                }
            }
            slices
        })
    };

    let display_handle = {
        let scheduler = Arc::clone(&scheduler);
        thread::spawn(move || {
            for _ in 0..300 {
                let _ = scheduler.create_process();
                let roster = scheduler.get_all_processes();
                let ids: HashSet<Pid> = roster.iter().map(|p| p.id).collect();
                assert_eq!(ids.len(), roster.len(), "duplicate PID in snapshot");
                let running = roster
                    .iter()
                    .filter(|p| p.state == ProcessState::Running)
                    .count();
                assert!(running <= 1, "more than one running process");
                for pcb in &roster {
                    assert!(pcb.priority <= 49);
                    assert!((1..=5).contains(&pcb.remaining_life));
                }
            }
            scheduler.set_quit(true);
        })
    };

    display_handle.join().unwrap();
    let slices = loop_handle.join().unwrap();

    assert!(scheduler.get_all_processes().is_empty());
    assert!(scheduler.running().is_none());
    let metrics = scheduler.metrics();
    assert_eq!(metrics.created, metrics.completed);
    assert_eq!(metrics.time_slices, slices);
    assert!(metrics.peak_live <= PID_CAPACITY);

    // Every PID is free again.
    for pid in 1..=100 {
        assert!(scheduler.is_pid_available(pid));
    }
}

#[test]
fn snapshots_serialize_as_json() {
    let scheduler = Scheduler::with_seed(23);
    scheduler.create_process_with(12, 3).unwrap();
    scheduler.schedule_process().unwrap();

    let roster = serde_json::to_value(scheduler.get_all_processes()).unwrap();
    assert_eq!(roster[0]["id"], 1);
    assert_eq!(roster[0]["state"], "run");
    assert_eq!(roster[0]["priority"], 12);
    assert_eq!(roster[0]["remaining_life"], 3);

    let status = serde_json::to_value(scheduler.queue_status()).unwrap();
    assert_eq!(status["total_ready"], 0);
    assert_eq!(status["running"], 1);
}
