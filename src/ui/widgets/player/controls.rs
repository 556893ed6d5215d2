use crate::app::App;
use crate::player::PlaybackState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.playhead.borrow().time_control;
    let play_icon = match state {
        PlaybackState::Playing => "⏸",
        PlaybackState::Paused => "▶",
        PlaybackState::WaitingToPlayAtRate => "…",
    };
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    // Only remote players can skip tracks
    let skip_style = if app.is_remote() {
        btn_style
    } else {
        Style::default().fg(theme.surface)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Volume Bar
        ])
        .split(area);

    let buttons = Line::from(vec![
        Span::styled("   ⏮   ", skip_style),
        Span::raw("   "),
        Span::styled(format!("   {}   ", play_icon), btn_style),
        Span::raw("   "),
        Span::styled("   ⏭   ", skip_style),
    ]);
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        chunks[0],
    );

    let volume = (app.track.volume.clamp(0.0, 1.0) * 100.0).round() as usize;
    let filled = volume / 10;
    let bar = format!(
        "🔊 {}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        volume
    );
    f.render_widget(
        Paragraph::new(Span::styled(bar, Style::default().fg(theme.green)))
            .alignment(Alignment::Center),
        chunks[2],
    );
}
