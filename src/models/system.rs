// CPU and memory records

use serde::{Deserialize, Serialize};

use super::percent_of;

/// CPU utilization over one sampling window. Both fields are 0 when the
/// window could not be measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuSample {
    pub usage_percent: f64,
    pub idle_percent: f64,
}

impl CpuSample {
    /// Rate between two cumulative `/proc/stat` counter rows.
    ///
    /// Rows shorter than 4 counters, or a non-positive total delta, give a zeroed sample.
    pub fn between(first: &[u64], second: &[u64]) -> Self {
        if first.len() < 4 || second.len() < 4 {
            return Self::default();
        }
        let total1: i128 = first.iter().map(|&v| v as i128).sum();
        let total2: i128 = second.iter().map(|&v| v as i128).sum();
        let d_total = total2 - total1;
        let d_idle = second[3] as i128 - first[3] as i128;
        if d_total <= 0 {
            return Self::default();
        }
        let idle_percent = 100.0 * d_idle as f64 / d_total as f64;
        Self {
            usage_percent: 100.0 - idle_percent,
            idle_percent,
        }
    }
}

/// Memory totals in KiB, as reported by `/proc/meminfo`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryReading {
    pub total_kb: u64,
    pub used_kb: u64,
    pub free_kb: u64,
    pub available_kb: u64,
    pub usage_percent: f64,
}

impl MemoryReading {
    /// Derive `used_kb` and `usage_percent` from the three raw counters.
    pub fn from_counters(total_kb: u64, free_kb: u64, available_kb: u64) -> Self {
        Self {
            total_kb,
            used_kb: total_kb.saturating_sub(free_kb),
            free_kb,
            available_kb,
            usage_percent: percent_of(total_kb.saturating_sub(available_kb), total_kb),
        }
    }
}
