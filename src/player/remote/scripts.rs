/// Script sources for one target application, built once per player.
///
/// Everything except `launch` is guarded so that talking to an application
/// that is not running does nothing instead of starting it.
#[derive(Debug, Clone)]
pub struct ScriptSet {
    guard: String,
    pub launch: String,
    pub play: String,
    pub pause: String,
    pub player_position: String,
    pub player_state: String,
    pub duration: String,
    pub volume: String,
    pub current_track: String,
    pub previous_track: String,
    pub next_track: String,
}

impl ScriptSet {
    pub fn new(app_name: &str) -> Self {
        let app = quote(app_name);
        let guard = format!(
            "if application {app} is running then tell application {app} to "
        );
        let guarded = |command: &str| format!("{guard}{command}");

        Self {
            launch: format!("tell application {app} to run"),
            play: guarded("play"),
            pause: guarded("pause"),
            player_position: guarded("get the player position"),
            player_state: guarded("get the player state"),
            duration: guarded("get the duration of the current track"),
            volume: guarded("get the sound volume"),
            current_track: guarded(
                "get {the name of the current track, the artist of the current track, the album of the current track}",
            ),
            previous_track: guarded("previous track"),
            next_track: guarded("next track"),
            guard,
        }
    }

    /// `volume` on the application's 0–100 scale.
    pub fn set_volume(&self, volume: i64) -> String {
        format!("{}set the sound volume to {}", self.guard, volume)
    }

    pub fn set_player_position(&self, seconds: f64) -> String {
        format!("{}set the player position to {}", self.guard, seconds)
    }
}

/// AppleScript string literal.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
