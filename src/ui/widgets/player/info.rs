use crate::app::App;
use crate::player::{MediaSource, PlayerStatus};
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_badge(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let badge = match &app.source {
        Some(MediaSource::Remote(name)) => Span::styled(
            format!("\u{00A0}REMOTE · {}\u{00A0}", name),
            Style::default()
                .fg(theme.base)
                .bg(theme.magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Some(MediaSource::Stream(_)) => Span::styled(
            "\u{00A0}STREAM\u{00A0}",
            Style::default()
                .fg(theme.base)
                .bg(theme.blue)
                .add_modifier(Modifier::BOLD),
        ),
        Some(MediaSource::File(_)) => Span::styled(
            "\u{00A0}LOCAL\u{00A0}",
            Style::default()
                .fg(theme.base)
                .bg(theme.green)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("nothing open", Style::default().fg(theme.overlay)),
    };
    f.render_widget(
        Paragraph::new(Line::from(badge)).alignment(Alignment::Center),
        area,
    );
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let width = area.width.saturating_sub(2) as usize;
    let track = &app.track;
    let status = app.playhead.borrow().status;

    let title = if !track.title.is_empty() {
        track.title.clone()
    } else if status == PlayerStatus::Failed {
        "Could not open".to_string()
    } else if let Some(MediaSource::File(path)) = &app.source {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    } else {
        "Not Playing".to_string()
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate(&title, width),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&track.artist, width),
            Style::default().fg(theme.cyan),
        )),
        Line::from(Span::styled(
            truncate(&track.album, width),
            Style::default()
                .fg(theme.overlay)
                .add_modifier(Modifier::ITALIC),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
