//! Parallel execution heuristics and configuration
//!
//! Hardware-aware decisions about when per-group work and join hash builds
//! are worth dispatching to the rayon pool, based on:
//! - Available CPU cores
//! - Row and group counts
//! - User overrides via the REFRAME_PARALLEL_THRESHOLD environment variable
//!
//! Only compiled when the `parallel` feature is enabled. Parallelism is an
//! execution detail: output row order and values are identical with the
//! feature on or off.

use std::sync::OnceLock;

/// Global parallel configuration, initialized once on first access
static PARALLEL_CONFIG: OnceLock<ParallelConfig> = OnceLock::new();

/// Configuration for parallel execution decisions
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads available (from rayon)
    pub num_threads: usize,
    /// Row count thresholds for the hardware tier
    pub thresholds: ParallelThresholds,
}

/// Operation-specific row count thresholds for parallel execution
#[derive(Debug, Clone, Copy)]
pub struct ParallelThresholds {
    /// Threshold for grouped summarize/mutate
    pub grouped: usize,
    /// Threshold for join hash builds and probes
    pub join: usize,
}

impl ParallelConfig {
    /// Get or initialize the global parallel configuration
    pub fn global() -> &'static ParallelConfig {
        PARALLEL_CONFIG.get_or_init(Self::detect)
    }

    fn detect() -> Self {
        let num_threads = rayon::current_num_threads();

        let thresholds = match std::env::var("REFRAME_PARALLEL_THRESHOLD") {
            Ok(threshold_str) => Self::parse_threshold_override(&threshold_str),
            Err(_) => Self::thresholds_for_hardware(num_threads),
        };

        ParallelConfig { num_threads, thresholds }
    }

    /// Parse REFRAME_PARALLEL_THRESHOLD: a number sets one threshold for
    /// every operation; "max" or "disabled" turns parallelism off; anything
    /// else falls back to hardware detection
    fn parse_threshold_override(threshold_str: &str) -> ParallelThresholds {
        let threshold_str = threshold_str.trim().to_lowercase();

        if threshold_str == "max" || threshold_str == "disabled" {
            ParallelThresholds { grouped: usize::MAX, join: usize::MAX }
        } else if let Ok(threshold) = threshold_str.parse::<usize>() {
            ParallelThresholds { grouped: threshold, join: threshold }
        } else {
            Self::thresholds_for_hardware(rayon::current_num_threads())
        }
    }

    /// Thresholds by hardware tier: the fewer the cores, the higher the row
    /// count needed before coordination overhead pays off
    fn thresholds_for_hardware(num_threads: usize) -> ParallelThresholds {
        match num_threads {
            // Single core: never parallelize
            1 => ParallelThresholds { grouped: usize::MAX, join: usize::MAX },
            // 2-3 cores: very conservative
            2..=3 => ParallelThresholds { grouped: 12_500, join: 15_000 },
            // 4-7 cores: moderate
            4..=7 => ParallelThresholds { grouped: 3_750, join: 5_000 },
            // 8+ cores
            _ => ParallelThresholds { grouped: 1_500, join: 2_500 },
        }
    }

    /// Whether per-group dispatch is worthwhile. A single group has nothing
    /// to fan out, whatever the row count.
    pub fn should_parallelize_grouped(&self, row_count: usize, group_count: usize) -> bool {
        group_count >= 2 && row_count >= self.thresholds.grouped
    }

    /// Whether a join's hash build/probe should go to the pool, keyed on
    /// the probe side's row count
    pub fn should_parallelize_join(&self, row_count: usize) -> bool {
        row_count >= self.thresholds.join
    }
}
