// Internet bandwidth: slow probe, cached result

mod probe;

pub use probe::{BandwidthProbe, ProbeConfig, parse_curl_speed, parse_speedtest_simple};

use crate::models::BandwidthResult;
use std::sync::{Arc, Mutex, PoisonError};

/// Latest successful bandwidth measurement, shared between the refresh task and snapshot readers.
///
/// The lock is held only to copy a value in or out, never across a probe.
#[derive(Debug, Clone, Default)]
pub struct BandwidthCache {
    inner: Arc<Mutex<BandwidthResult>>,
}

impl BandwidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current value; `available` is false until the first successful probe.
    pub fn get(&self) -> BandwidthResult {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the cached value if `result` is a successful measurement.
    /// Returns whether the cache changed; failed probes keep the previous value.
    pub fn store(&self, result: BandwidthResult) -> bool {
        if !result.available {
            return false;
        }
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = result;
        true
    }
}
