pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = &app.theme;

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    widgets::player::render(f, main_layout[0], app);

    // Footer: toast wins over key hints
    let footer = if let Some(toast) = &app.toast {
        Line::from(Span::styled(
            toast.message.clone(),
            Style::default().fg(theme.yellow),
        ))
    } else if app.show_keyhints {
        let keys = &app.config.keys;
        let (seek_back, seek_fwd) = seek_labels(app.config.seek_step_secs);
        let mut spans = Vec::new();
        for (key, label) in [
            (&keys.play_pause, "play/pause"),
            (&keys.prev_track, "prev"),
            (&keys.next_track, "next"),
            (&keys.seek_backward, seek_back.as_str()),
            (&keys.seek_forward, seek_fwd.as_str()),
            (&keys.volume_down, "vol-"),
            (&keys.volume_up, "vol+"),
            (&keys.quit, "quit"),
        ] {
            spans.push(Span::styled(
                format!(" {} ", keys.display(key)),
                Style::default()
                    .fg(theme.blue)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{} ", label),
                Style::default().fg(theme.overlay),
            ));
        }
        for (i, name) in app.remote_apps.iter().take(9).enumerate() {
            spans.push(Span::styled(
                format!(" {} ", i + 1),
                Style::default()
                    .fg(theme.magenta)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{} ", name),
                Style::default().fg(theme.overlay),
            ));
        }
        Line::from(spans)
    } else {
        Line::from(vec![
            Span::styled(
                " ? ",
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ])
    };
    f.render_widget(
        Paragraph::new(footer).alignment(Alignment::Right),
        main_layout[1],
    );
}

/// Key-hint labels for the seek keys, e.g. `-5s` / `+5s`.
fn seek_labels(step_secs: f64) -> (String, String) {
    (format!("-{}s", step_secs), format!("+{}s", step_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_labels_follow_step() {
        assert_eq!(seek_labels(5.0), ("-5s".to_string(), "+5s".to_string()));
        assert_eq!(seek_labels(2.5), ("-2.5s".to_string(), "+2.5s".to_string()));
    }
}
