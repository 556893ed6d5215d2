pub mod controls;
pub mod info;
pub mod progress;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders},
    Frame,
};

/// The player card: header, track info, progress, controls.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Source badge
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Title / Artist / Album
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Time
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Controls + Volume
            Constraint::Min(0),
        ])
        .split(inner);

    info::render_badge(f, chunks[0], app);
    info::render(f, chunks[2], app);
    progress::render_progress(f, chunks[4], app);
    progress::render_time(f, chunks[5], app);
    controls::render(f, chunks[7], app);
}
