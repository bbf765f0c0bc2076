// Host metrics read straight from /proc and /sys

pub mod parse;
mod statfs;

use crate::models::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

/// Pause between the two `/proc/stat` reads of a CPU sample.
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_millis(200);

/// Reads pseudo-files under two overridable roots (normally `/proc` and `/sys`).
///
/// Every getter is infallible: a missing or malformed source yields an empty
/// or zeroed record and a debug log line.
#[derive(Debug, Clone)]
pub struct ProcfsRepo {
    proc_path: PathBuf,
    sys_path: PathBuf,
}

impl ProcfsRepo {
    pub fn new(proc_path: impl Into<PathBuf>, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            proc_path: proc_path.into(),
            sys_path: sys_path.into(),
        }
    }

    fn read_proc(&self, relative: &str) -> Option<String> {
        read_source(&self.proc_path.join(relative))
    }

    /// Blocks the calling thread for [`CPU_SAMPLE_INTERVAL`].
    #[instrument(skip(self), fields(repo = "procfs", operation = "get_cpu_sample"))]
    pub fn get_cpu_sample(&self) -> CpuSample {
        let Some(first) = self.read_proc("stat") else {
            return CpuSample::default();
        };
        std::thread::sleep(CPU_SAMPLE_INTERVAL);
        let second = self.read_proc("stat").unwrap_or_default();
        CpuSample::between(
            &parse::parse_cpu_counters(&first),
            &parse::parse_cpu_counters(&second),
        )
    }

    #[instrument(skip(self), fields(repo = "procfs", operation = "get_memory"))]
    pub fn get_memory(&self) -> MemoryReading {
        self.read_proc("meminfo")
            .map(|content| parse::parse_meminfo(&content))
            .unwrap_or_default()
    }

    /// Capacity of every real block-device mount. Mounts whose statvfs fails are skipped.
    #[instrument(skip(self), fields(repo = "procfs", operation = "get_disks"))]
    pub fn get_disks(&self) -> Vec<DiskVolume> {
        let Some(content) = self.read_proc("mounts") else {
            return Vec::new();
        };
        parse::parse_mounts(&content)
            .into_iter()
            .filter_map(|mount| match statfs::capacity_kb(&mount.mount_point) {
                Ok((total_kb, free_kb)) => {
                    Some(DiskVolume::new(mount.mount_point, total_kb, free_kb))
                }
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        mount = %mount.mount_point,
                        device = %mount.device,
                        "statvfs failed; skipping mount"
                    );
                    None
                }
            })
            .collect()
    }

    #[instrument(skip(self), fields(repo = "procfs", operation = "get_network"))]
    pub fn get_network(&self) -> Vec<NetworkInterfaceStat> {
        self.read_proc("net/dev")
            .map(|content| parse::parse_net_dev(&content))
            .unwrap_or_default()
    }

    #[instrument(skip(self), fields(repo = "procfs", operation = "get_disk_io"))]
    pub fn get_disk_io(&self) -> Vec<DiskIoStat> {
        self.read_proc("diskstats")
            .map(|content| parse::parse_diskstats(&content))
            .unwrap_or_default()
    }

    /// One reading per `thermal_zone*` directory with a parsable `temp`, sorted by zone.
    #[instrument(skip(self), fields(repo = "procfs", operation = "get_thermal"))]
    pub fn get_thermal(&self) -> Vec<ThermalReading> {
        let base = self.sys_path.join("class/thermal");
        let entries = match std::fs::read_dir(&base) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(error = %e, path = %base.display(), "thermal class unavailable");
                return Vec::new();
            }
        };

        let mut zones: Vec<(String, ThermalReading)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let zone = entry.file_name().to_string_lossy().into_owned();
                if !zone.contains("thermal_zone") {
                    return None;
                }
                let dir = entry.path();
                let temperature_celsius =
                    parse::parse_millidegrees(&read_source(&dir.join("temp"))?)?;
                let name = read_source(&dir.join("type"))
                    .and_then(|t| t.lines().next().map(|l| l.trim().to_string()))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| zone.clone());
                Some((
                    zone,
                    ThermalReading {
                        name,
                        temperature_celsius,
                    },
                ))
            })
            .collect();
        zones.sort_by(|a, b| a.0.cmp(&b.0));
        zones.into_iter().map(|(_, reading)| reading).collect()
    }
}

fn read_source(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::debug!(error = %e, path = %path.display(), "pseudo-file unavailable");
            None
        }
    }
}
