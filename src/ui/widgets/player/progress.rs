use crate::app::App;
use crate::player::MediaTime;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let gauge_area_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let ratio = app.progress().unwrap_or(0.0);
    let width = gauge_area_rect.width as usize;
    let occupied_width = (width as f64 * ratio) as usize;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    let mut bar_spans: Vec<Span> = Vec::with_capacity(width);
    for i in 0..width {
        if i < occupied_width {
            if i == occupied_width.saturating_sub(1) {
                // Playhead knob
                bar_spans.push(Span::styled("●", fill_style));
            } else {
                bar_spans.push(Span::styled("━", fill_style));
            }
        } else {
            bar_spans.push(Span::styled("─", empty_style));
        }
    }

    let gauge_p = Paragraph::new(Line::from(bar_spans))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge_p, gauge_area_rect);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let position = app.playhead.borrow().position;
    let duration = app.track.duration.unwrap_or(MediaTime::INDEFINITE);
    let time_label = Paragraph::new(format!("{} / {}", position, duration))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.overlay));
    f.render_widget(time_label, area);
}
