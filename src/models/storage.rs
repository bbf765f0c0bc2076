// Disk capacity and disk I/O records

use serde::{Deserialize, Serialize};

use super::percent_of;

/// Capacity of one mounted block-device filesystem, in KiB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskVolume {
    pub path: String,
    pub total_kb: u64,
    pub used_kb: u64,
    pub free_kb: u64,
    pub usage_percent: f64,
}

impl DiskVolume {
    pub fn new(path: impl Into<String>, total_kb: u64, free_kb: u64) -> Self {
        let used_kb = total_kb.saturating_sub(free_kb);
        Self {
            path: path.into(),
            total_kb,
            used_kb,
            free_kb,
            usage_percent: percent_of(used_kb, total_kb),
        }
    }
}

/// Cumulative I/O counters for one whole disk (`/proc/diskstats`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskIoStat {
    pub name: String,
    pub reads_completed: u64,
    pub writes_completed: u64,
    pub read_sectors: u64,
    pub write_sectors: u64,
}
