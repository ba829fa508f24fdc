//! UI module root: the dashboard view (the concrete UI-write sink) and the
//! drawing functions for individual panels.

pub mod activities;
pub mod footer;
pub mod gauges;
pub mod header;

use ratatui::layout::{Constraint, Direction, Layout};

use crate::refresh::{UiKey, UiSink, UiValue, SYNC_IDLE_LABEL};
use crate::types::Activity;

/// One activity row known to the view. Rows are registered once at startup;
/// refresh ticks only update rows that already exist.
#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub id: String,
    pub progress: f64,
    pub time: String,
}

/// Keyed state behind the rendered dashboard. Implements the UI-write
/// contract: the coordinator pushes values, `draw` renders whatever is
/// currently held. Unset values render as "N/A".
pub struct DashboardView {
    pub status_text: String,
    pub status_kind: String,
    pub cpu_value: Option<String>,
    pub cpu_pct: f64,
    pub memory_value: Option<String>,
    pub memory_pct: f64,
    pub network_value: Option<String>,
    pub storage_value: Option<String>,
    pub storage_pct: f64,
    pub rows: Vec<ActivityRow>,
    pub last_sync: String,
    pub sync_enabled: bool,
    pub sync_label: String,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            status_text: "connecting...".into(),
            status_kind: "unknown".into(),
            cpu_value: None,
            cpu_pct: 0.0,
            memory_value: None,
            memory_pct: 0.0,
            network_value: None,
            storage_value: None,
            storage_pct: 0.0,
            rows: Vec::new(),
            last_sync: "Never".into(),
            sync_enabled: true,
            sync_label: SYNC_IDLE_LABEL.into(),
        }
    }
}

impl DashboardView {
    /// Register the fixed set of activity rows this dashboard displays.
    pub fn register_rows(&mut self, activities: &[Activity]) {
        self.rows = activities
            .iter()
            .map(|a| ActivityRow {
                id: a.id.clone(),
                progress: if a.progress.is_finite() {
                    a.progress.clamp(0.0, 100.0)
                } else {
                    0.0
                },
                time: a.time.clone(),
            })
            .collect();
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut ActivityRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, gauges, activities, footer
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // cpu / memory / storage gauges
                Constraint::Min(4),    // activities
                Constraint::Length(1), // footer (sync control + last sync)
            ])
            .split(area);

        header::draw_header(f, rows[0], self);

        let gauge_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[1]);
        gauges::draw_cpu(f, gauge_cols[0], self);
        gauges::draw_memory(f, gauge_cols[1], self);
        gauges::draw_storage(f, gauge_cols[2], self);

        activities::draw_activities(f, rows[2], self);
        footer::draw_footer(f, rows[3], self);
    }
}

impl UiSink for DashboardView {
    fn set(&mut self, key: UiKey, value: UiValue) {
        match (key, value) {
            (UiKey::StatusText, UiValue::Text(s)) => self.status_text = s,
            (UiKey::StatusIndicator, UiValue::Text(s)) => self.status_kind = s,
            (UiKey::CpuValue, UiValue::Text(s)) => self.cpu_value = Some(s),
            (UiKey::CpuBar, UiValue::Percent(p)) => self.cpu_pct = p,
            (UiKey::MemoryValue, UiValue::Text(s)) => self.memory_value = Some(s),
            (UiKey::MemoryBar, UiValue::Percent(p)) => self.memory_pct = p,
            (UiKey::NetworkValue, UiValue::Text(s)) => self.network_value = Some(s),
            (UiKey::StorageValue, UiValue::Text(s)) => self.storage_value = Some(s),
            (UiKey::StorageBar, UiValue::Percent(p)) => self.storage_pct = p,
            (UiKey::ActivityProgress(id), UiValue::Percent(p)) => {
                // Unknown ids are ignored; the view never grows rows mid-flight.
                if let Some(row) = self.row_mut(&id) {
                    row.progress = p;
                }
            }
            (UiKey::ActivityTime(id), UiValue::Text(t)) => {
                if let Some(row) = self.row_mut(&id) {
                    row.time = t;
                }
            }
            (UiKey::LastSync, UiValue::Text(s)) => self.last_sync = s,
            (UiKey::SyncEnabled, UiValue::Enabled(b)) => self.sync_enabled = b,
            (UiKey::SyncLabel, UiValue::Text(s)) => self.sync_label = s,
            // Mismatched key/value shapes carry nothing renderable.
            _ => {}
        }
    }
}
