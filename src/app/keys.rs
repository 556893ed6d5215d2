use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Everything a key press can ask the shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PlayPause,
    NextTrack,
    PrevTrack,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
    ToggleKeyhints,
    /// Index into the installed remote applications (0-based)
    SelectRemote(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    pub quit: String,
    pub play_pause: String,
    pub next_track: String,
    pub prev_track: String,
    pub volume_up: String,
    pub volume_down: String,
    pub toggle_keyhints: String,
    pub seek_forward: String,
    pub seek_backward: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            play_pause: "Space".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            volume_up: "+".to_string(),
            volume_down: "-".to_string(),
            toggle_keyhints: "?".to_string(),
            seek_forward: "Right".to_string(),
            seek_backward: "Left".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Esc" => event.code == KeyCode::Esc,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s if s.chars().count() == 1 => {
                if let Some(ch) = s.chars().next() {
                    // Check for shift modifier if char is uppercase
                    if ch.is_uppercase() {
                        event.code == KeyCode::Char(ch)
                            || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                                && event.modifiers.contains(KeyModifiers::SHIFT))
                    } else {
                        event.code == KeyCode::Char(ch)
                    }
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Maps a key press to an action. Digits 1–9 pick a remote application.
    pub fn action_for(&self, event: KeyEvent) -> Option<Action> {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let bindings = [
            (&self.quit, Action::Quit),
            (&self.play_pause, Action::PlayPause),
            (&self.next_track, Action::NextTrack),
            (&self.prev_track, Action::PrevTrack),
            (&self.volume_up, Action::VolumeUp),
            (&self.volume_down, Action::VolumeDown),
            (&self.toggle_keyhints, Action::ToggleKeyhints),
            (&self.seek_forward, Action::SeekForward),
            (&self.seek_backward, Action::SeekBackward),
        ];
        if let Some((_, action)) = bindings.iter().find(|(key, _)| self.matches(event, key)) {
            return Some(*action);
        }

        match event.code {
            KeyCode::Char(c @ '1'..='9') => Some(Action::SelectRemote(c as usize - '1' as usize)),
            _ => None,
        }
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Space" => "Space".to_string(),
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            _ => key_str.to_string(),
        }
    }
}
