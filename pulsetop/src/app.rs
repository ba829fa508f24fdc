//! App state and main loop: input handling, refresh ticks, manual sync,
//! and drawing.

use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::sleep;
use tracing::info;

use crate::refresh::{RefreshCoordinator, Ticker};
use crate::ui::DashboardView;

pub struct App {
    coordinator: RefreshCoordinator,
    view: DashboardView,
    ticker: Ticker,
    should_quit: bool,
}

impl App {
    pub fn new(coordinator: RefreshCoordinator, refresh_period: Duration) -> Self {
        Self {
            coordinator,
            view: DashboardView::default(),
            ticker: Ticker::new(refresh_period),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // The activity rows the dashboard will track are whatever the
        // service lists at startup; later ticks only update those rows.
        let rows = self.coordinator.bootstrap_rows().await;
        self.view.register_rows(&rows);
        info!(rows = rows.len(), "dashboard starting");

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) => match k.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            self.should_quit = true;
                        }
                        KeyCode::Char('s') | KeyCode::Char('S') => {
                            self.coordinator.manual_sync(&mut self.view).await;
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            self.coordinator.refresh(&mut self.view).await;
                        }
                        _ => {}
                    },
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            // Periodic refresh (fires immediately on the first pass)
            if self.ticker.due() {
                self.coordinator.refresh(&mut self.view).await;
            }

            terminal.draw(|f| self.view.draw(f))?;

            sleep(Duration::from_millis(100)).await;
        }

        Ok(())
    }
}
