// Pure parsers for /proc text formats. Malformed input degrades per line, never per file.

use crate::models::{DiskIoStat, MemoryReading, NetworkInterfaceStat};

/// Filesystem types that never back a real block device.
pub const PSEUDO_FILESYSTEMS: &[&str] = &[
    "proc", "sysfs", "tmpfs", "devtmpfs", "cgroup", "cgroup2", "devpts", "overlay", "none",
];

/// One line of `/proc/mounts` that survived the block-device filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

/// Cumulative counters from the aggregate `cpu` line (first line of `/proc/stat`).
/// Stops at the first non-numeric field.
pub fn parse_cpu_counters(content: &str) -> Vec<u64> {
    let Some(line) = content.lines().next() else {
        return Vec::new();
    };
    line.split_whitespace()
        .skip(1)
        .map_while(|v| v.parse::<u64>().ok())
        .collect()
}

/// `Key: value kB` lines; unknown keys and unparsable values are ignored.
pub fn parse_meminfo(content: &str) -> MemoryReading {
    let (mut total, mut free, mut available) = (0, 0, 0);
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<u64>() else {
            continue;
        };
        match key {
            "MemTotal:" => total = value,
            "MemFree:" => free = value,
            "MemAvailable:" => available = value,
            _ => {}
        }
    }
    MemoryReading::from_counters(total, free, available)
}

/// Mounts backed by `/dev/*` devices with a non-pseudo filesystem type.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let device = parts.next()?;
            let mount_point = parts.next()?;
            let fs_type = parts.next()?;
            if PSEUDO_FILESYSTEMS.contains(&fs_type) || !device.starts_with("/dev/") {
                return None;
            }
            Some(MountEntry {
                device: device.to_string(),
                mount_point: unescape_mount_path(mount_point),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// The kernel writes space, tab, newline and backslash in mount paths as 3-digit octal escapes.
fn unescape_mount_path(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1..=i + 3].iter().all(|b| (b'0'..=b'7').contains(b))
        {
            let code = bytes[i + 1..=i + 3]
                .iter()
                .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
            if let Ok(b) = u8::try_from(code) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// `/proc/net/dev`: two header lines, then `name: rx_bytes rx_packets ... tx_bytes tx_packets ...`.
pub fn parse_net_dev(content: &str) -> Vec<NetworkInterfaceStat> {
    content
        .lines()
        .skip(2)
        .filter_map(|line| {
            let (name, rest) = match line.split_once(':') {
                Some((name, rest)) => (name.trim(), rest),
                None => {
                    let line = line.trim_start();
                    line.split_once(char::is_whitespace).unwrap_or((line, ""))
                }
            };
            if name.is_empty() || name == "lo" {
                return None;
            }
            let fields: Vec<&str> = rest.split_whitespace().collect();
            Some(NetworkInterfaceStat {
                name: name.to_string(),
                rx_bytes: field(&fields, 0),
                rx_packets: field(&fields, 1),
                tx_bytes: field(&fields, 8),
                tx_packets: field(&fields, 9),
            })
        })
        .collect()
}

/// `/proc/diskstats`: `major minor name reads merged sectors ms writes merged sectors ...`.
/// Partitions and loop/ram devices are skipped so whole-disk totals are not double counted.
pub fn parse_diskstats(content: &str) -> Vec<DiskIoStat> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace().skip(2);
            let name = parts.next()?;
            if !is_whole_disk(name) {
                return None;
            }
            let fields: Vec<&str> = parts.collect();
            Some(DiskIoStat {
                name: name.to_string(),
                reads_completed: field(&fields, 0),
                read_sectors: field(&fields, 2),
                writes_completed: field(&fields, 4),
                write_sectors: field(&fields, 6),
            })
        })
        .collect()
}

pub fn is_whole_disk(name: &str) -> bool {
    !(name.starts_with("loop")
        || name.starts_with("ram")
        || name.chars().any(|c| c.is_ascii_digit()))
}

/// Raw thermal `temp` content (millidegrees Celsius) to degrees.
pub fn parse_millidegrees(content: &str) -> Option<f64> {
    content
        .split_whitespace()
        .next()?
        .parse::<i64>()
        .ok()
        .map(|raw| raw as f64 / 1000.0)
}

fn field(fields: &[&str], idx: usize) -> u64 {
    fields.get(idx).and_then(|v| v.parse().ok()).unwrap_or(0)
}
