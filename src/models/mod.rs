// Snapshot record types; field names are the JSON wire names.

mod bandwidth;
mod container;
mod network;
mod snapshot;
mod storage;
mod system;
mod thermal;

pub use bandwidth::BandwidthResult;
pub use container::{ContainerHealth, ContainerStatus};
pub use network::NetworkInterfaceStat;
pub use snapshot::{HealthSnapshot, format_timestamp};
pub use storage::{DiskIoStat, DiskVolume};
pub use system::{CpuSample, MemoryReading};
pub use thermal::ThermalReading;

/// `100 * part / whole`, or 0 when `whole` is 0.
pub(crate) fn percent_of(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}
