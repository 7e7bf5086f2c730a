use clap::{Parser, ValueEnum};
use mlfq_core::Config;

/// How roster, queue and metrics snapshots are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Terminal driver for the MLFQ process scheduler simulation.
///
/// Creates a handful of processes, then dispatches one time slice after
/// another. Type `help` for the commands read from stdin.
#[derive(Parser, Debug)]
#[command(name = "mlfq-driver", version, about)]
pub struct CliArgs {
    /// Config profile (keys are read as {PROFILE}_{KEY} first)
    #[arg(long, env = "MLFQ_PROFILE")]
    pub profile: Option<String>,

    /// Simulated time slice in milliseconds
    #[arg(long)]
    pub time_slice_ms: Option<u64>,

    /// Countdown tick in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Wait between scheduling attempts when nothing is ready
    #[arg(long)]
    pub idle_wait_ms: Option<u64>,

    /// Processes created at startup
    #[arg(long)]
    pub initial: Option<usize>,

    /// Create one process every N milliseconds (0 disables)
    #[arg(long)]
    pub spawn_interval_ms: Option<u64>,

    /// Seed for reproducible process attributes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format for snapshots
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the roster after every time slice
    #[arg(long)]
    pub watch: bool,
}

impl CliArgs {
    /// Overlay flags that were given on top of the env-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(v) = self.time_slice_ms {
            config.timing.time_slice_ms = v;
        }
        if let Some(v) = self.tick_ms {
            config.timing.tick_ms = v.max(1);
        }
        if let Some(v) = self.idle_wait_ms {
            config.timing.idle_wait_ms = v;
        }
        if let Some(v) = self.initial {
            config.workload.initial_processes = v;
        }
        if let Some(v) = self.spawn_interval_ms {
            config.workload.spawn_interval_ms = v;
        }
        if self.seed.is_some() {
            config.workload.seed = self.seed;
        }
    }
}
