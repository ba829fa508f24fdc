//! Best-effort local metrics: CPU load estimate, memory, network, storage.
//!
//! Availability varies by host, so every accessor degrades to an explicit
//! absence (`None`) instead of failing; a missing capability must never
//! block a refresh tick. Samples are recomputed on every call, never cached.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sysinfo::{Disks, Networks, System};

/// Raw host readings behind a seam so tests can fake capability absence.
/// `None` always means "this host does not expose the reading".
pub trait HostReadings: Send + Sync {
    /// Logical core count hint.
    fn cpu_cores(&self) -> Option<usize>;
    /// Wall-clock duration of one fixed busy-work computation.
    fn busywork_elapsed(&self) -> Option<Duration>;
    /// (used, total) memory in bytes.
    fn memory_bytes(&self) -> Option<(u64, u64)>;
    /// (online, connection kind).
    fn network(&self) -> (bool, String);
    /// (used, total) bytes of the volume holding our data. Runs on a
    /// blocking thread; may be slow.
    fn storage_bytes(&self) -> Option<(u64, u64)>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuSample {
    pub cores: usize,
    /// Synthetic load estimate (0..=90), not an OS CPU reading.
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemorySample {
    pub used_mb: f64,
    pub total_mb: f64,
}

impl MemorySample {
    pub fn label(&self) -> String {
        format!("{:.1}/{:.1} MB", self.used_mb, self.total_mb)
    }

    pub fn percent(&self) -> Option<f64> {
        percent_of(self.used_mb, self.total_mb)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSample {
    pub online: bool,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageSample {
    pub used_mb: f64,
    pub total_mb: f64,
}

impl StorageSample {
    pub fn used_label(&self) -> String {
        format!("{:.1} MB", self.used_mb)
    }

    pub fn total_label(&self) -> String {
        format!("{:.1} MB", self.total_mb)
    }

    pub fn percent(&self) -> Option<f64> {
        percent_of(self.used_mb, self.total_mb)
    }
}

/// used/total as a percentage with one-decimal precision, `None` when the
/// total is zero or either side is not a finite number.
fn percent_of(used: f64, total: f64) -> Option<f64> {
    if !used.is_finite() || !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some((used / total * 1000.0).round() / 10.0)
}

fn bytes_to_mb(b: u64) -> f64 {
    b as f64 / 1024.0 / 1024.0
}

pub struct MetricsProbe {
    host: Arc<dyn HostReadings>,
}

impl MetricsProbe {
    pub fn new(host: Arc<dyn HostReadings>) -> Self {
        Self { host }
    }

    pub fn sysinfo() -> Self {
        Self::new(Arc::new(SysinfoHost::default()))
    }

    /// Core count (default 4 when the hint is missing) plus a load estimate
    /// derived from how long a fixed busy-work loop took: elapsed-ms / 10,
    /// clamped to 90. Deliberately approximate.
    pub fn cpu(&self) -> CpuSample {
        let cores = self.host.cpu_cores().unwrap_or(4);
        let percent = self
            .host
            .busywork_elapsed()
            .map(|d| (d.as_secs_f64() * 1000.0 / 10.0).min(90.0))
            .filter(|p| p.is_finite());
        CpuSample { cores, percent }
    }

    /// Used/total memory in MB. No estimation when the host can't report
    /// it; absence is reported honestly.
    pub fn memory(&self) -> Option<MemorySample> {
        let (used, total) = self.host.memory_bytes()?;
        if total == 0 {
            return None;
        }
        Some(MemorySample {
            used_mb: bytes_to_mb(used),
            total_mb: bytes_to_mb(total),
        })
    }

    pub fn network(&self) -> NetworkSample {
        let (online, kind) = self.host.network();
        NetworkSample { online, kind }
    }

    /// Used/total space of the volume backing our data dir. The scan is
    /// blocking, so it runs off the event loop; a panicking or failing scan
    /// is absorbed into `None`.
    pub async fn storage_usage(&self) -> Option<StorageSample> {
        let host = Arc::clone(&self.host);
        let bytes = tokio::task::spawn_blocking(move || host.storage_bytes())
            .await
            .ok()
            .flatten()?;
        let (used, total) = bytes;
        if total == 0 {
            return None;
        }
        Some(StorageSample {
            used_mb: bytes_to_mb(used),
            total_mb: bytes_to_mb(total),
        })
    }
}

/// Production readings via sysinfo (plus the stdlib parallelism hint).
#[derive(Default)]
pub struct SysinfoHost;

impl HostReadings for SysinfoHost {
    fn cpu_cores(&self) -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }

    fn busywork_elapsed(&self) -> Option<Duration> {
        let start = Instant::now();
        let mut acc: u64 = 0;
        for i in 0..1_000_000u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        std::hint::black_box(acc);
        Some(start.elapsed())
    }

    fn memory_bytes(&self) -> Option<(u64, u64)> {
        let mut sys = System::new();
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return None;
        }
        Some((sys.used_memory(), total))
    }

    fn network(&self) -> (bool, String) {
        let nets = Networks::new_with_refreshed_list();
        let mut online = false;
        let mut kind = "unknown".to_string();
        for (name, _) in nets.iter() {
            if is_loopback(name) {
                continue;
            }
            online = true;
            if let Some(k) = iface_kind(name) {
                kind = k.to_string();
                break;
            }
        }
        (online, kind)
    }

    fn storage_bytes(&self) -> Option<(u64, u64)> {
        let disks = Disks::new_with_refreshed_list();
        let anchor = crate::store::config_dir();
        let disk = pick_disk(&disks, &anchor)?;
        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        Some((used, total))
    }
}

fn is_loopback(name: &str) -> bool {
    name == "lo" || name.starts_with("lo0")
}

fn iface_kind(name: &str) -> Option<&'static str> {
    let n = name.to_ascii_lowercase();
    if n.starts_with("wl") {
        Some("wifi")
    } else if n.starts_with("en") || n.starts_with("eth") {
        Some("ethernet")
    } else {
        None
    }
}

/// Prefer the disk whose mount point is the longest prefix of `anchor`
/// (the volume that actually holds our data); fall back to the first
/// non-empty disk.
fn pick_disk<'a>(disks: &'a Disks, anchor: &Path) -> Option<&'a sysinfo::Disk> {
    disks
        .iter()
        .filter(|d| d.total_space() > 0)
        .filter(|d| anchor.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .or_else(|| disks.iter().find(|d| d.total_space() > 0))
}
