// The assembled health document

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::{
    BandwidthResult, ContainerStatus, CpuSample, DiskIoStat, DiskVolume, MemoryReading,
    NetworkInterfaceStat, ThermalReading,
};

/// Fixed UTC wire format, e.g. `2026-10-16T08:30:00Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// One point-in-time aggregation of every record; built per request.
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub cpu: CpuSample,
    pub memory: MemoryReading,
    pub disks: Vec<DiskVolume>,
    pub network: Vec<NetworkInterfaceStat>,
    pub disk_io: Vec<DiskIoStat>,
    pub temperature: Vec<ThermalReading>,
    pub docker: Vec<ContainerStatus>,
    pub internet_speed: BandwidthResult,
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}
