// Bandwidth probe tiers and cache sharing

mod common;

use chrono::Utc;
use common::ScriptedRunner;
use serverhealth::bandwidth::{BandwidthCache, BandwidthProbe, ProbeConfig};
use serverhealth::models::BandwidthResult;
use std::sync::Arc;

const SPEEDTEST_SIMPLE: &str = "Ping: 14.2 ms\nDownload: 93.4 Mbit/s\nUpload: 20.1 Mbit/s\n";

fn probe(runner: Arc<ScriptedRunner>) -> BandwidthProbe {
    BandwidthProbe::new(runner, ProbeConfig::default())
}

#[test]
fn speedtest_result_is_used_when_installed() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .with("speedtest-cli", SPEEDTEST_SIMPLE)
            .with("curl", "1250000"),
    );
    let r = probe(runner.clone()).measure();
    assert!(r.available);
    assert_eq!(r.download_mbps, 93.4);
    assert_eq!(r.upload_mbps, 20.1);
    assert!(r.measured_at.is_some());
    assert_eq!(runner.calls(), vec!["speedtest-cli --simple".to_string()]);
}

#[test]
fn curl_fallback_when_speedtest_missing() {
    let runner = Arc::new(ScriptedRunner::new().with("curl", "1250000.000"));
    let r = probe(runner.clone()).measure();
    assert!(r.available);
    assert_eq!(r.download_mbps, 10.0);
    assert_eq!(r.upload_mbps, 0.0);

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        "curl -s --max-time 20 -o /dev/null -w %{speed_download} https://speed.cloudflare.com/__down?bytes=5000000"
    );
}

#[test]
fn curl_fallback_when_speedtest_reports_nothing() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .with("speedtest-cli", "Ping: 0 ms\nDownload: 0.00 Mbit/s\nUpload: 0.00 Mbit/s\n")
            .with("curl", "2500000"),
    );
    let r = probe(runner).measure();
    assert!(r.available);
    assert_eq!(r.download_mbps, 20.0);
}

#[test]
fn unavailable_when_both_tiers_fail() {
    let runner = Arc::new(ScriptedRunner::new().with("curl", "0.000"));
    let r = probe(runner).measure();
    assert!(!r.available);
    assert_eq!(r.download_mbps, 0.0);
    assert_eq!(r.upload_mbps, 0.0);
}

#[test]
fn configured_fallback_is_used() {
    let runner = Arc::new(ScriptedRunner::new().with("curl", "8000000"));
    let config = ProbeConfig {
        speedtest_program: "my-speedtest".into(),
        fallback_url: "http://mirror.local/blob".into(),
        fallback_timeout_secs: 5,
    };
    let r = BandwidthProbe::new(runner.clone(), config).measure();
    assert_eq!(r.download_mbps, 64.0);
    let calls = runner.calls();
    assert_eq!(calls[0], "my-speedtest --simple");
    assert!(calls[1].contains("--max-time 5"));
    assert!(calls[1].ends_with("http://mirror.local/blob"));
}

#[test]
fn cache_serves_last_good_value() {
    let cache = BandwidthCache::new();
    assert!(!cache.get().available);

    let runner = Arc::new(ScriptedRunner::new().with("speedtest-cli", SPEEDTEST_SIMPLE));
    assert!(cache.store(probe(runner).measure()));

    let failed = probe(Arc::new(ScriptedRunner::new())).measure();
    assert!(!cache.store(failed));

    let r = cache.get();
    assert!(r.available);
    assert_eq!(r.download_mbps, 93.4);
}

#[test]
fn concurrent_readers_never_see_torn_values() {
    let cache = BandwidthCache::new();
    let stamp = Utc::now();
    cache.store(BandwidthResult::measured(1.0, 1.0, stamp));

    let writer = {
        let cache = cache.clone();
        std::thread::spawn(move || {
            for i in 0..2_000u32 {
                let v = f64::from(i % 7 + 1);
                cache.store(BandwidthResult::measured(v, v, stamp));
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    let r = cache.get();
                    assert!(r.available);
                    assert_eq!(r.download_mbps, r.upload_mbps);
                    assert_eq!(r.measured_at, Some(stamp));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}
