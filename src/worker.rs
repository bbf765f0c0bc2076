// Background bandwidth refresher: probe at startup, then sleep a fixed interval after each probe.
// Probes run on the blocking pool; the cache lock is only taken to store the result.

use crate::bandwidth::{BandwidthCache, BandwidthProbe};
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::Instrument;

/// Probe and cache for the refresher, plus an optional shutdown signal.
pub struct WorkerDeps {
    pub probe: Arc<BandwidthProbe>,
    pub cache: BandwidthCache,
    /// `None` runs for the life of the process.
    pub shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
}

pub struct WorkerConfig {
    pub refresh_interval_secs: u64,
}

pub fn spawn_bandwidth_refresher(
    deps: WorkerDeps,
    config: WorkerConfig,
) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        probe,
        cache,
        shutdown_rx,
    } = deps;
    let refresh_interval = Duration::from_secs(config.refresh_interval_secs);
    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "bandwidth_worker",
        refresh_interval_secs = config.refresh_interval_secs
    );

    let task = async move {
        let shutdown = async move {
            match shutdown_rx {
                Some(rx) => {
                    let _ = rx.await;
                }
                None => std::future::pending::<()>().await,
            }
        };
        let mut shutdown = std::pin::pin!(shutdown);

        loop {
            let probe = probe.clone();
            match tokio::task::spawn_blocking(move || probe.measure()).await {
                Ok(result) if cache.store(result) => {
                    tracing::info!(
                        download_mbps = result.download_mbps,
                        upload_mbps = result.upload_mbps,
                        "bandwidth cache refreshed"
                    );
                }
                Ok(_) => {
                    tracing::warn!(
                        operation = "bandwidth_probe",
                        "bandwidth probe failed; keeping previous value"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, operation = "bandwidth_probe", "probe task failed");
                }
            }

            // The gap is measured from the end of one measurement to the start of the next.
            tokio::select! {
                _ = sleep(refresh_interval) => {}
                _ = &mut shutdown => {
                    tracing::debug!("Bandwidth worker shutting down");
                    break;
                }
            }
        }
    };

    tokio::spawn(task.instrument(worker_span))
}
