//! Bottom line: sync control state and last successful sync.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::DashboardView;

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let sync_style = if view.sync_enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled(format!("[s] {}", view.sync_label), sync_style),
        Span::raw(format!("  |  last sync: {}", view.last_sync)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
