use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub timing: TimingConfig,
    pub workload: WorkloadConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `MLFQ_PROFILE`. When set (e.g. `DEMO`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("MLFQ_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            timing: TimingConfig::from_env_profiled(p),
            workload: WorkloadConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  timing:    time_slice={}ms, tick={}ms, idle_wait={}ms",
            self.timing.time_slice_ms,
            self.timing.tick_ms,
            self.timing.idle_wait_ms
        );
        tracing::info!(
            "  workload:  initial={}, spawn_interval={}ms, seed={}",
            self.workload.initial_processes,
            self.workload.spawn_interval_ms,
            self.workload
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "(entropy)".to_string())
        );
        tracing::info!("  op log:    capacity={}", self.workload.op_log_capacity);
    }
}

// ── Timing ────────────────────────────────────────────────────

/// Simulated time owned by the driver. The scheduler itself never sleeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    pub time_slice_ms: u64,
    /// Countdown granularity; quit is polled once per tick.
    pub tick_ms: u64,
    /// Back-off when no process is ready.
    pub idle_wait_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            time_slice_ms: 2000,
            tick_ms: 100,
            idle_wait_ms: 500,
        }
    }
}

impl TimingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            time_slice_ms: profiled_env_u64(p, "TIME_SLICE_MS", d.time_slice_ms),
            tick_ms: profiled_env_u64(p, "TICK_MS", d.tick_ms).max(1),
            idle_wait_ms: profiled_env_u64(p, "IDLE_WAIT_MS", d.idle_wait_ms),
        }
    }

    pub fn time_slice(&self) -> Duration {
        Duration::from_millis(self.time_slice_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_ms)
    }
}

// ── Workload ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Processes created before the scheduling loop starts.
    pub initial_processes: usize,
    /// Auto-spawn period in milliseconds. 0 disables auto-spawn.
    pub spawn_interval_ms: u64,
    /// Entries kept in the driver's operation log.
    pub op_log_capacity: usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            initial_processes: 5,
            spawn_interval_ms: 0,
            op_log_capacity: 5,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            initial_processes: profiled_env_usize(p, "INITIAL_PROCESSES", d.initial_processes),
            spawn_interval_ms: profiled_env_u64(p, "SPAWN_INTERVAL_MS", d.spawn_interval_ms),
            op_log_capacity: profiled_env_usize(p, "OP_LOG_CAPACITY", d.op_log_capacity),
            seed: profiled_env_opt(p, "MLFQ_SEED").and_then(|v| v.parse().ok()),
        }
    }

    pub fn spawn_interval(&self) -> Option<Duration> {
        (self.spawn_interval_ms > 0).then(|| Duration::from_millis(self.spawn_interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own profile prefix so parallel tests never share keys.

    const UNPREFIXED_KEYS: [&str; 7] = [
        "TIME_SLICE_MS",
        "TICK_MS",
        "IDLE_WAIT_MS",
        "INITIAL_PROCESSES",
        "SPAWN_INTERVAL_MS",
        "OP_LOG_CAPACITY",
        "MLFQ_SEED",
    ];

    /// Drop shell-level fallbacks so defaults are observable.
    fn clear_unprefixed_keys() {
        for key in UNPREFIXED_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_match_reference_timing() {
        clear_unprefixed_keys();
        let config = Config::for_profile("CFGTEST_UNSET");
        assert_eq!(config.timing.time_slice_ms, 2000);
        assert_eq!(config.timing.tick_ms, 100);
        assert_eq!(config.timing.idle_wait_ms, 500);
        assert_eq!(config.workload.initial_processes, 5);
        assert_eq!(config.workload.op_log_capacity, 5);
        assert!(config.workload.spawn_interval().is_none());
        assert!(config.workload.seed.is_none());
    }

    #[test]
    fn profiled_key_wins() {
        env::set_var("CFGTEST_FAST_TIME_SLICE_MS", "250");
        env::set_var("CFGTEST_FAST_SPAWN_INTERVAL_MS", "1500");
        env::set_var("CFGTEST_FAST_MLFQ_SEED", "99");
        let config = Config::for_profile("cfgtest_fast");
        assert_eq!(config.profile, "CFGTEST_FAST");
        assert_eq!(config.timing.time_slice(), Duration::from_millis(250));
        assert_eq!(config.workload.spawn_interval(), Some(Duration::from_millis(1500)));
        assert_eq!(config.workload.seed, Some(99));
    }

    #[test]
    fn unparsable_value_falls_back() {
        clear_unprefixed_keys();
        env::set_var("CFGTEST_BAD_TICK_MS", "soon");
        env::set_var("CFGTEST_BAD_INITIAL_PROCESSES", "-3");
        let config = Config::for_profile("CFGTEST_BAD");
        assert_eq!(config.timing.tick_ms, 100);
        assert_eq!(config.workload.initial_processes, 5);
    }

    #[test]
    fn zero_tick_is_raised() {
        env::set_var("CFGTEST_ZERO_TICK_MS", "0");
        let config = Config::for_profile("CFGTEST_ZERO");
        assert_eq!(config.timing.tick(), Duration::from_millis(1));
    }

    #[test]
    fn profile_label_default() {
        assert_eq!(Config::default().profile_label(), "default");
        assert_eq!(Config::for_profile("demo").profile_label(), "DEMO");
    }
}
