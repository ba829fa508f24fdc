//! The refresh cycle: pull remote status + local metrics, push keyed
//! updates into the UI-write contract, track the last successful sync.
//!
//! Each step of a tick degrades independently: a dead backend still lets
//! local metrics render, a host without a metrics capability still lets
//! remote status render. Nothing in here returns Err to the event loop.

use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{debug, warn};

use crate::api::RemoteClient;
use crate::probe::MetricsProbe;
use crate::store::SyncStore;
use crate::types::Activity;

/// Keys of the UI-write contract. Rendering decides what each key looks
/// like; the coordinator only decides what each key says.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UiKey {
    StatusText,
    StatusIndicator,
    CpuValue,
    CpuBar,
    MemoryValue,
    MemoryBar,
    NetworkValue,
    StorageValue,
    StorageBar,
    ActivityProgress(String),
    ActivityTime(String),
    LastSync,
    SyncEnabled,
    SyncLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiValue {
    Text(String),
    Percent(f64),
    Enabled(bool),
}

/// Where computed values land. The TUI implements this; tests record it.
pub trait UiSink {
    fn set(&mut self, key: UiKey, value: UiValue);
}

pub const SYNC_IDLE_LABEL: &str = "Sync Now";
pub const SYNC_BUSY_LABEL: &str = "Syncing...";

/// Fires immediately on the first `due()` call, then once per period.
/// Ticks are polled, not scheduled, so tests (and the event loop) decide
/// when a tick actually runs.
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    pub fn due(&mut self) -> bool {
        let fire = match self.last {
            None => true,
            Some(at) => at.elapsed() >= self.period,
        };
        if fire {
            self.last = Some(Instant::now());
        }
        fire
    }
}

pub struct RefreshCoordinator {
    api: RemoteClient,
    probe: MetricsProbe,
    store: SyncStore,
    activities: Vec<Activity>,
}

impl RefreshCoordinator {
    pub fn new(api: RemoteClient, probe: MetricsProbe, store: SyncStore) -> Self {
        Self {
            api,
            probe,
            store,
            activities: Vec::new(),
        }
    }

    /// Latest activity list, replaced wholesale on every tick.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Fetch the activity list once, outside the tick cycle. The UI uses
    /// this to decide which rows exist; later ticks only update rows the
    /// sink already knows.
    pub async fn bootstrap_rows(&self) -> Vec<Activity> {
        self.api.activities().await
    }

    /// One full tick. Never fails; every step falls back to sentinels or
    /// skips its writes, leaving whatever the sink showed before.
    pub async fn refresh(&mut self, ui: &mut dyn UiSink) {
        debug!("refresh tick");
        self.write_status(ui).await;
        self.write_cpu(ui);
        self.write_memory(ui);
        self.write_network(ui);
        self.write_storage(ui).await;
        self.write_activities(ui).await;
        self.write_last_sync(ui);
    }

    /// Manual "sync now": busy out the control, trigger the remote sync,
    /// persist the timestamp and re-refresh on success. The control is
    /// re-enabled and its label restored on both outcomes.
    pub async fn manual_sync(&mut self, ui: &mut dyn UiSink) {
        ui.set(UiKey::SyncEnabled, UiValue::Enabled(false));
        ui.set(UiKey::SyncLabel, UiValue::Text(SYNC_BUSY_LABEL.into()));

        let outcome = self.api.sync_now().await;
        if outcome.success {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            if let Err(e) = self.store.record_sync(&stamp) {
                warn!(error = %e, "failed to persist sync timestamp");
            }
            self.refresh(ui).await;
        } else if let Some(err) = outcome.error {
            warn!(error = %err, "manual sync rejected");
        }

        ui.set(UiKey::SyncEnabled, UiValue::Enabled(true));
        ui.set(UiKey::SyncLabel, UiValue::Text(SYNC_IDLE_LABEL.into()));
    }

    async fn write_status(&self, ui: &mut dyn UiSink) {
        let status = self.api.system_status().await;
        let state = status.status.as_str();
        ui.set(UiKey::StatusText, UiValue::Text(state.to_string()));
        ui.set(UiKey::StatusIndicator, UiValue::Text(state.to_string()));
    }

    fn write_cpu(&self, ui: &mut dyn UiSink) {
        let cpu = self.probe.cpu();
        // No write when the estimate is unavailable; the prior value stays.
        if let Some(pct) = cpu.percent {
            ui.set(
                UiKey::CpuValue,
                UiValue::Text(format!("{pct:.1}% est ({} cores)", cpu.cores)),
            );
            ui.set(UiKey::CpuBar, UiValue::Percent(pct));
        }
    }

    fn write_memory(&self, ui: &mut dyn UiSink) {
        if let Some(mem) = self.probe.memory() {
            ui.set(UiKey::MemoryValue, UiValue::Text(mem.label()));
            if let Some(pct) = mem.percent() {
                ui.set(UiKey::MemoryBar, UiValue::Percent(pct));
            }
        }
    }

    fn write_network(&self, ui: &mut dyn UiSink) {
        let net = self.probe.network();
        let line = if net.online {
            format!("online ({})", net.kind)
        } else {
            "offline".to_string()
        };
        ui.set(UiKey::NetworkValue, UiValue::Text(line));
    }

    async fn write_storage(&self, ui: &mut dyn UiSink) {
        if let Some(storage) = self.probe.storage_usage().await {
            ui.set(
                UiKey::StorageValue,
                UiValue::Text(format!(
                    "{}/{}",
                    storage.used_label(),
                    storage.total_label()
                )),
            );
            if let Some(pct) = storage.percent() {
                ui.set(UiKey::StorageBar, UiValue::Percent(pct));
            }
        }
    }

    async fn write_activities(&mut self, ui: &mut dyn UiSink) {
        self.activities = self.api.activities().await;
        for activity in &self.activities {
            if !activity.progress.is_finite() {
                continue;
            }
            ui.set(
                UiKey::ActivityProgress(activity.id.clone()),
                UiValue::Percent(activity.progress.clamp(0.0, 100.0)),
            );
            ui.set(
                UiKey::ActivityTime(activity.id.clone()),
                UiValue::Text(activity.time.clone()),
            );
        }
    }

    fn write_last_sync(&self, ui: &mut dyn UiSink) {
        ui.set(UiKey::LastSync, UiValue::Text(self.store.last_sync()));
    }
}
