//! Activity rows: one progress gauge per tracked activity.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, LineGauge, Paragraph},
};

use crate::ui::DashboardView;

pub fn draw_activities(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let block = Block::default().borders(Borders::ALL).title("Activities");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.rows.is_empty() {
        f.render_widget(Paragraph::new("no activities reported"), inner);
        return;
    }

    for (i, row) in view.rows.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break; // rows past the panel bottom are clipped
        }
        let line = Rect::new(inner.x, y, inner.width, 1);
        let g = LineGauge::default()
            .filled_style(Style::default().fg(Color::Green))
            .unfilled_style(Style::default().fg(Color::DarkGray))
            .ratio((row.progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{} — {}", row.id, row.time));
        f.render_widget(g, line);
    }
}
