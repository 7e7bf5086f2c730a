//! Text and JSON rendering of scheduler snapshots.

use std::fmt::Write;

use anyhow::{Context, Result};
use mlfq_core::Pcb;
use mlfq_sched::{QueueStatus, SchedulerMetrics};

use crate::cli::OutputFormat;

/// Non-empty levels shown in the queue summary.
const QUEUE_SUMMARY_LEVELS: usize = 5;

pub fn roster(processes: &[Pcb], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(processes).context("failed to serialize roster")
        }
        OutputFormat::Text => Ok(roster_text(processes)),
    }
}

pub fn queues(status: &QueueStatus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(status).context("failed to serialize queue status")
        }
        OutputFormat::Text => Ok(queues_text(status)),
    }
}

pub fn metrics(metrics: &SchedulerMetrics, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(metrics).context("failed to serialize metrics")
        }
        OutputFormat::Text => Ok(metrics_text(metrics)),
    }
}

fn roster_text(processes: &[Pcb]) -> String {
    if processes.is_empty() {
        return "no processes".to_string();
    }
    let mut out = format!("processes ({}):", processes.len());
    for p in processes {
        let marker = if p.is_running() { "→ " } else { "  " };
        let _ = write!(
            out,
            "\n{}PID: {} | state: {} | priority: {} | life: {}",
            marker, p.id, p.state, p.priority, p.remaining_life
        );
    }
    out
}

fn queues_text(status: &QueueStatus) -> String {
    let mut out = format!("ready queues: {} processes", status.total_ready);
    for (level, len) in status.top_levels(QUEUE_SUMMARY_LEVELS) {
        let _ = write!(out, "\n  priority {}: {}", level, len);
    }
    if let Some(pid) = status.running {
        let _ = write!(out, "\nrunning: PID {}", pid);
    }
    out
}

fn metrics_text(m: &SchedulerMetrics) -> String {
    format!(
        "created={} rejected={} dispatched={} idle={} slices={} completed={} live={} peak={}",
        m.created,
        m.rejected,
        m.dispatched,
        m.idle,
        m.time_slices,
        m.completed,
        m.live(),
        m.peak_live
    )
}
