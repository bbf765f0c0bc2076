// Snapshot assembly: every extractor plus a copy of the cached bandwidth.

use crate::bandwidth::BandwidthCache;
use crate::docker_repo::DockerRepo;
use crate::models::HealthSnapshot;
use crate::procfs_repo::ProcfsRepo;
use chrono::Utc;
use tracing::instrument;

pub struct HealthCollector {
    procfs: ProcfsRepo,
    docker: DockerRepo,
    bandwidth: BandwidthCache,
}

impl HealthCollector {
    pub fn new(procfs: ProcfsRepo, docker: DockerRepo, bandwidth: BandwidthCache) -> Self {
        Self {
            procfs,
            docker,
            bandwidth,
        }
    }

    pub fn bandwidth(&self) -> &BandwidthCache {
        &self.bandwidth
    }

    /// Build a fresh snapshot. Synchronous: blocks for the CPU sampling window
    /// and the `docker ps` call, but never for a bandwidth probe.
    #[instrument(skip(self), fields(operation = "snapshot"))]
    pub fn snapshot(&self) -> HealthSnapshot {
        let cpu = self.procfs.get_cpu_sample();
        let memory = self.procfs.get_memory();
        let disks = self.procfs.get_disks();
        let network = self.procfs.get_network();
        let disk_io = self.procfs.get_disk_io();
        let temperature = self.procfs.get_thermal();
        let docker = self.docker.list_containers();
        let internet_speed = self.bandwidth.get();

        HealthSnapshot {
            timestamp: Utc::now(),
            cpu,
            memory,
            disks,
            network,
            disk_io,
            temperature,
            docker,
            internet_speed,
        }
    }
}
