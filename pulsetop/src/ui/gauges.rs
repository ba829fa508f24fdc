//! CPU / memory / storage gauges.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};

use crate::ui::DashboardView;

fn draw_gauge(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    label: Option<&str>,
    pct: f64,
    color: Color,
) {
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .gauge_style(Style::default().fg(color))
        .percent(pct.clamp(0.0, 100.0).round() as u16)
        .label(label.unwrap_or("N/A").to_string());
    f.render_widget(g, area);
}

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    // Labelled as an estimate: the value is busy-loop timing, not an OS reading.
    draw_gauge(
        f,
        area,
        "CPU (load est.)",
        view.cpu_value.as_deref(),
        view.cpu_pct,
        Color::Cyan,
    );
}

pub fn draw_memory(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    draw_gauge(
        f,
        area,
        "Memory",
        view.memory_value.as_deref(),
        view.memory_pct,
        Color::Magenta,
    );
}

pub fn draw_storage(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    draw_gauge(
        f,
        area,
        "Storage",
        view.storage_value.as_deref(),
        view.storage_pct,
        Color::Blue,
    );
}
