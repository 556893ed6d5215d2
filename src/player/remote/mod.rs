//! Drives another media application over the scripting bridge and presents
//! it through [`PlayerTrait`].
//!
//! The application is polled (100 ms) once somebody observes the position;
//! transport commands force an immediate refresh so observers never wait for
//! the next tick. Every bridge failure degrades to a neutral value.

pub mod apps;
pub mod scripts;

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::bridge::{OsascriptBridge, ScriptBridge, ScriptValue};
use crate::player::metadata::{MetadataItem, MetadataKey};
use crate::player::time::MediaTime;
use crate::player::timer::PollTimer;
use crate::player::traits::{
    ObserverHandle, ObserverList, PlaybackState, PlayerStatus, PlayerTrait, StateCallback,
    StateChange, TimeCallback,
};

pub use apps::{installed_apps, RemoteApp, KNOWN_APPS};
pub use scripts::ScriptSet;

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw durations above this are taken to be milliseconds for apps with the quirk.
const MS_DURATION_THRESHOLD: f64 = 1000.0;

const STATE_PAUSED: &str = "kPSp";
const STATE_PLAYING: &str = "kPSP";

pub struct ScriptedRemotePlayer<B: ScriptBridge = OsascriptBridge> {
    app_name: String,
    bridge: B,
    scripts: ScriptSet,
    duration_in_ms: bool,
    waits_to_minimize_stalling: bool,
    rate: f32,
    status: PlayerStatus,
    time_control_status: PlaybackState,
    last_observed_second: i64,
    time_observers: ObserverList<TimeCallback>,
    state_observers: ObserverList<StateCallback>,
    poll_timer: Option<PollTimer>,
}

impl ScriptedRemotePlayer<OsascriptBridge> {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_bridge(app_name, OsascriptBridge::new())
    }
}

impl<B: ScriptBridge> ScriptedRemotePlayer<B> {
    /// Binds to `app_name` and asks it to launch. A failed launch is logged;
    /// the player stays usable and every later command is a guarded no-op.
    pub fn with_bridge(app_name: impl Into<String>, bridge: B) -> Self {
        let app_name = app_name.into();
        let scripts = ScriptSet::new(&app_name);

        if let Err(e) = bridge.execute(&scripts.launch) {
            warn!(app = %app_name, error = %e, "could not launch remote application");
        }

        Self {
            duration_in_ms: apps::reports_duration_in_ms(&app_name),
            app_name,
            bridge,
            scripts,
            waits_to_minimize_stalling: false,
            rate: 0.0,
            status: PlayerStatus::Unknown,
            time_control_status: PlaybackState::Paused,
            last_observed_second: 0,
            time_observers: ObserverList::default(),
            state_observers: ObserverList::default(),
            poll_timer: None,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn is_polling(&self) -> bool {
        self.poll_timer.is_some()
    }

    fn run(&self, script: &str, what: &str) -> Option<ScriptValue> {
        match self.bridge.execute(script) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(app = %self.app_name, command = what, error = %e, "script failed");
                None
            }
        }
    }

    /// Current position, read fresh. Zero when unreadable.
    pub fn player_position(&self) -> MediaTime {
        let seconds = self
            .run(&self.scripts.player_position, "player position")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        MediaTime::from_secs_f64(seconds)
    }

    /// Refreshes cached state and notifies time observers when the whole
    /// second changed, or unconditionally when `force` is set.
    pub fn update(&mut self, force: bool) {
        if self.status != PlayerStatus::ReadyToPlay {
            self.status = PlayerStatus::ReadyToPlay;
            self.state_observers
                .notify(StateChange::Status(PlayerStatus::ReadyToPlay));
        }

        let code = self
            .run(&self.scripts.player_state, "player state")
            .and_then(|v| v.as_text());
        let (state, rate) = playback_state_for_code(code.as_deref());
        self.set_time_control_status(state);
        self.set_rate(rate);

        let position = self.player_position();
        let second = position.whole_seconds();
        if force || second != self.last_observed_second {
            self.last_observed_second = second;
            for callback in self.time_observers.iter_mut() {
                callback(position);
            }
        }
    }

    fn set_rate(&mut self, rate: f32) {
        if self.rate != rate {
            self.rate = rate;
            self.state_observers.notify(StateChange::Rate(rate));
        }
    }

    fn set_time_control_status(&mut self, state: PlaybackState) {
        if self.time_control_status != state {
            self.time_control_status = state;
            self.state_observers.notify(StateChange::TimeControl(state));
        }
    }

    fn transport(&mut self, script: fn(&ScriptSet) -> &String, what: &str) {
        let source = script(&self.scripts).clone();
        self.run(&source, what);
        self.update(true);
    }
}

/// Maps a player-state code to transport state and rate. Anything but the
/// two known codes, including no answer at all, reads as waiting.
pub fn playback_state_for_code(code: Option<&str>) -> (PlaybackState, f32) {
    match code {
        Some(STATE_PAUSED) => (PlaybackState::Paused, 0.0),
        Some(STATE_PLAYING) => (PlaybackState::Playing, 1.0),
        _ => (PlaybackState::WaitingToPlayAtRate, 0.0),
    }
}

/// Applies the milliseconds correction and maps 0 to the "unknown" sentinel.
pub fn normalize_duration(raw: f64, reports_duration_in_ms: bool) -> MediaTime {
    let mut seconds = raw;
    if reports_duration_in_ms && seconds > MS_DURATION_THRESHOLD {
        seconds /= 1000.0;
    }
    if seconds == 0.0 {
        return MediaTime::INDEFINITE;
    }
    MediaTime::from_secs_f64(seconds)
}

/// 0.0–1.0 → the application's 0–100 scale.
pub fn volume_to_percent(volume: f32) -> i64 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as i64
}

pub fn percent_to_volume(percent: i64) -> f32 {
    percent.clamp(0, 100) as f32 / 100.0
}

/// Exactly three text items (name, artist, album), or nothing.
fn metadata_from_track(value: &ScriptValue) -> Vec<MetadataItem> {
    let Some([title, artist, album]) = value.items() else {
        return Vec::new();
    };
    match (title.as_str(), artist.as_str(), album.as_str()) {
        (Some(title), Some(artist), Some(album)) => vec![
            MetadataItem::new(MetadataKey::Title, title),
            MetadataItem::new(MetadataKey::Artist, artist),
            MetadataItem::new(MetadataKey::AlbumName, album),
        ],
        _ => Vec::new(),
    }
}

impl<B: ScriptBridge> PlayerTrait for ScriptedRemotePlayer<B> {
    fn play(&mut self) {
        self.transport(|s| &s.play, "play");
    }

    fn pause(&mut self) {
        self.transport(|s| &s.pause, "pause");
    }

    fn seek(&mut self, to: MediaTime) {
        let source = self.scripts.set_player_position(to.seconds());
        self.run(&source, "seek");
    }

    /// The interval is ignored: all observers share one fixed-cadence poll.
    fn add_periodic_time_observer(
        &mut self,
        _interval: Duration,
        callback: TimeCallback,
    ) -> ObserverHandle {
        if self.poll_timer.is_none() {
            debug!(app = %self.app_name, "starting poll timer");
            self.poll_timer = Some(PollTimer::new(POLL_INTERVAL, Instant::now()));
        }
        self.time_observers.insert(callback)
    }

    fn add_state_observer(&mut self, callback: StateCallback) -> ObserverHandle {
        self.state_observers.insert(callback)
    }

    fn remove_observer(&mut self, handle: ObserverHandle) {
        if !self.time_observers.remove(handle) {
            self.state_observers.remove(handle);
            return;
        }
        if self.time_observers.is_empty() && self.poll_timer.take().is_some() {
            debug!(app = %self.app_name, "last observer gone, poll timer stopped");
        }
    }

    fn volume(&self) -> f32 {
        self.run(&self.scripts.volume, "volume")
            .and_then(|v| v.as_i64())
            .map(percent_to_volume)
            .unwrap_or(0.0)
    }

    fn set_volume(&mut self, volume: f32) {
        let source = self.scripts.set_volume(volume_to_percent(volume));
        self.run(&source, "set volume");
    }

    fn waits_to_minimize_stalling(&self) -> bool {
        self.waits_to_minimize_stalling
    }

    fn set_waits_to_minimize_stalling(&mut self, waits: bool) {
        self.waits_to_minimize_stalling = waits;
    }

    fn rate(&self) -> f32 {
        self.rate
    }

    fn status(&self) -> PlayerStatus {
        self.status
    }

    fn time_control_status(&self) -> PlaybackState {
        self.time_control_status
    }

    fn current_duration(&self) -> Option<MediaTime> {
        let raw = self.run(&self.scripts.duration, "duration")?.as_f64()?;
        Some(normalize_duration(raw, self.duration_in_ms))
    }

    fn current_metadata(&self) -> Vec<MetadataItem> {
        self.run(&self.scripts.current_track, "current track")
            .map(|value| metadata_from_track(&value))
            .unwrap_or_default()
    }

    fn is_remote_controlled(&self) -> bool {
        true
    }

    fn previous_track(&mut self) {
        self.transport(|s| &s.previous_track, "previous track");
    }

    fn next_track(&mut self) {
        self.transport(|s| &s.next_track, "next track");
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.poll_timer.as_ref().map(PollTimer::deadline)
    }

    fn tick(&mut self, now: Instant) {
        let due = self
            .poll_timer
            .as_mut()
            .is_some_and(|timer| timer.fire(now));
        if due {
            self.update(false);
        }
    }
}

impl<B: ScriptBridge> Drop for ScriptedRemotePlayer<B> {
    fn drop(&mut self) {
        if self.poll_timer.take().is_some() {
            debug!(app = %self.app_name, "poll timer invalidated");
        }
    }
}
