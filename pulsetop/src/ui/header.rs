//! Top header with service status indicator and network state.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::ui::DashboardView;

pub fn status_color(kind: &str) -> Color {
    match kind {
        "active" => Color::Green,
        "offline" => Color::Red,
        _ => Color::Yellow,
    }
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let net = view.network_value.as_deref().unwrap_or("N/A");
    let title = Line::from(vec![
        Span::raw("pulsetop — service: "),
        Span::styled("● ", Style::default().fg(status_color(&view.status_kind))),
        Span::raw(view.status_text.clone()),
        Span::raw(format!("  |  net: {net}  (press 's' to sync, 'q' to quit)")),
    ]);
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
