//! Probe semantics with faked host readings: honest absence, MB formatting,
//! and the clamped synthetic CPU estimate.

use std::sync::Arc;
use std::time::Duration;

use pulsetop::probe::{HostReadings, MetricsProbe};

struct FakeHost {
    cores: Option<usize>,
    busywork: Option<Duration>,
    memory: Option<(u64, u64)>,
    network: (bool, String),
    storage: Option<(u64, u64)>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            cores: None,
            busywork: None,
            memory: None,
            network: (true, "unknown".into()),
            storage: None,
        }
    }
}

impl HostReadings for FakeHost {
    fn cpu_cores(&self) -> Option<usize> {
        self.cores
    }
    fn busywork_elapsed(&self) -> Option<Duration> {
        self.busywork
    }
    fn memory_bytes(&self) -> Option<(u64, u64)> {
        self.memory
    }
    fn network(&self) -> (bool, String) {
        (self.network.0, self.network.1.clone())
    }
    fn storage_bytes(&self) -> Option<(u64, u64)> {
        self.storage
    }
}

fn probe(host: FakeHost) -> MetricsProbe {
    MetricsProbe::new(Arc::new(host))
}

#[test]
fn memory_absence_is_reported_honestly() {
    let p = probe(FakeHost::default());
    assert!(p.memory().is_none());
}

#[test]
fn memory_zero_total_counts_as_absent() {
    let p = probe(FakeHost {
        memory: Some((123, 0)),
        ..FakeHost::default()
    });
    assert!(p.memory().is_none());
}

#[test]
fn memory_formats_mb_with_one_decimal() {
    let p = probe(FakeHost {
        memory: Some((512 * 1024 * 1024, 1024 * 1024 * 1024)),
        ..FakeHost::default()
    });
    let mem = p.memory().unwrap();
    assert_eq!(mem.label(), "512.0/1024.0 MB");
    assert_eq!(mem.percent(), Some(50.0));
}

#[tokio::test]
async fn storage_labels_convert_bytes_to_mb() {
    let p = probe(FakeHost {
        storage: Some((52428800, 104857600)),
        ..FakeHost::default()
    });
    let storage = p.storage_usage().await.unwrap();
    assert_eq!(storage.used_label(), "50.0 MB");
    assert_eq!(storage.total_label(), "100.0 MB");
    assert_eq!(storage.percent(), Some(50.0));
}

#[tokio::test]
async fn storage_absence_is_reported_honestly() {
    let p = probe(FakeHost::default());
    assert!(p.storage_usage().await.is_none());

    let p = probe(FakeHost {
        storage: Some((0, 0)),
        ..FakeHost::default()
    });
    assert!(p.storage_usage().await.is_none());
}

#[test]
fn cpu_core_count_defaults_to_four() {
    let p = probe(FakeHost::default());
    assert_eq!(p.cpu().cores, 4);

    let p = probe(FakeHost {
        cores: Some(16),
        ..FakeHost::default()
    });
    assert_eq!(p.cpu().cores, 16);
}

#[test]
fn cpu_estimate_scales_with_busywork_duration() {
    // 250 ms of busy-work -> 25.0
    let p = probe(FakeHost {
        busywork: Some(Duration::from_millis(250)),
        ..FakeHost::default()
    });
    assert_eq!(p.cpu().percent, Some(25.0));
}

#[test]
fn cpu_estimate_is_clamped_at_ninety() {
    let p = probe(FakeHost {
        busywork: Some(Duration::from_secs(2)),
        ..FakeHost::default()
    });
    assert_eq!(p.cpu().percent, Some(90.0));
}

#[test]
fn cpu_estimate_absent_without_fine_timing() {
    let p = probe(FakeHost::default());
    assert!(p.cpu().percent.is_none());
}

#[test]
fn network_kind_defaults_to_unknown() {
    let p = probe(FakeHost::default());
    let net = p.network();
    assert!(net.online);
    assert_eq!(net.kind, "unknown");

    let p = probe(FakeHost {
        network: (false, "wifi".into()),
        ..FakeHost::default()
    });
    let net = p.network();
    assert!(!net.online);
    assert_eq!(net.kind, "wifi");
}
