// Internet bandwidth measurement

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::format_timestamp;

/// Result of one bandwidth probe. Serialized as the snapshot's `internet_speed` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BandwidthResult {
    pub available: bool,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    #[serde(rename = "last_checked", serialize_with = "serialize_measured_at")]
    pub measured_at: Option<DateTime<Utc>>,
}

impl BandwidthResult {
    /// A measurement counts when either direction is positive.
    pub fn measured(download_mbps: f64, upload_mbps: f64, measured_at: DateTime<Utc>) -> Self {
        Self {
            available: download_mbps > 0.0 || upload_mbps > 0.0,
            download_mbps,
            upload_mbps,
            measured_at: Some(measured_at),
        }
    }
}

fn serialize_measured_at<S: Serializer>(
    measured_at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match measured_at {
        Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
        None => serializer.serialize_str(""),
    }
}
