// Bandwidth probe: speedtest-cli if installed, otherwise a timed curl download.

use crate::command::CommandRunner;
use crate::models::BandwidthResult;
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub speedtest_program: String,
    pub fallback_url: String,
    pub fallback_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            speedtest_program: "speedtest-cli".into(),
            fallback_url: "https://speed.cloudflare.com/__down?bytes=5000000".into(),
            fallback_timeout_secs: 20,
        }
    }
}

pub struct BandwidthProbe {
    runner: Arc<dyn CommandRunner>,
    config: ProbeConfig,
}

impl BandwidthProbe {
    pub fn new(runner: Arc<dyn CommandRunner>, config: ProbeConfig) -> Self {
        Self { runner, config }
    }

    /// Run one measurement. Blocks for as long as the external tool takes.
    /// The result is stamped with the current time; `available` is false when both tiers failed.
    #[instrument(skip(self), fields(operation = "bandwidth_probe"))]
    pub fn measure(&self) -> BandwidthResult {
        let (download, upload) = self
            .speedtest()
            .filter(|&(d, u)| d > 0.0 || u > 0.0)
            .or_else(|| self.curl_download().map(|d| (d, 0.0)))
            .unwrap_or((0.0, 0.0));
        BandwidthResult::measured(download, upload, Utc::now())
    }

    fn speedtest(&self) -> Option<(f64, f64)> {
        match self.runner.run(&self.config.speedtest_program, &["--simple"]) {
            Ok(out) => Some(parse_speedtest_simple(&out)),
            Err(e) => {
                tracing::debug!(error = %e, "speedtest unavailable, falling back to curl");
                None
            }
        }
    }

    fn curl_download(&self) -> Option<f64> {
        let timeout = self.config.fallback_timeout_secs.to_string();
        let args = [
            "-s",
            "--max-time",
            timeout.as_str(),
            "-o",
            "/dev/null",
            "-w",
            "%{speed_download}",
            self.config.fallback_url.as_str(),
        ];
        match self.runner.run("curl", &args) {
            Ok(out) => parse_curl_speed(&out).filter(|&mbps| mbps > 0.0),
            Err(e) => {
                tracing::debug!(error = %e, "curl bandwidth fallback failed");
                None
            }
        }
    }
}

/// `(download, upload)` in Mbit/s from `speedtest-cli --simple`. Missing lines read as 0.
pub fn parse_speedtest_simple(output: &str) -> (f64, f64) {
    let value = |rest: &str| {
        rest.split_whitespace()
            .next()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let (mut download, mut upload) = (0.0, 0.0);
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("Download:") {
            download = value(rest);
        } else if let Some(rest) = line.strip_prefix("Upload:") {
            upload = value(rest);
        }
    }
    (download, upload)
}

/// curl's `%{speed_download}` (bytes/s) to Mbit/s.
pub fn parse_curl_speed(output: &str) -> Option<f64> {
    let bytes_per_sec = output.trim().parse::<f64>().ok()?;
    Some(bytes_per_sec * 8.0 / 1e6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speedtest_simple_output() {
        let out = "Ping: 12.345 ms\nDownload: 93.40 Mbit/s\nUpload: 11.52 Mbit/s\n";
        assert_eq!(parse_speedtest_simple(out), (93.4, 11.52));
    }

    #[test]
    fn speedtest_garbage_is_zero() {
        assert_eq!(parse_speedtest_simple("Download: fast\n"), (0.0, 0.0));
        assert_eq!(parse_speedtest_simple(""), (0.0, 0.0));
    }

    #[test]
    fn curl_speed_to_mbps() {
        assert_eq!(parse_curl_speed("1250000.000"), Some(10.0));
        assert_eq!(parse_curl_speed("oops"), None);
    }
}
