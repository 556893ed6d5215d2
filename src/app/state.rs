use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tracing::{error, info};

use super::config::{PersistentState, UserConfig};
use super::keys::Action;
use crate::player::metadata::lookup;
use crate::player::{
    open_player, MediaSource, MediaTime, MetadataKey, ObserverHandle, PlaybackState,
    PlayerStatus, PlayerTrait, StateChange,
};
use crate::ui::theme::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Written by player callbacks, read by the shell.
#[derive(Debug, Clone, Default)]
pub struct Playhead {
    pub position: MediaTime,
    pub time_control: PlaybackState,
    pub status: PlayerStatus,
    pub rate: f32,
    /// Set whenever a callback fired since the last track refresh
    pub dirty: bool,
}

/// What the card shows about the current item. Refreshed only when the
/// playhead moved, so remote players are not queried on every redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackView {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: Option<MediaTime>,
    pub volume: f32,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub deadline: Instant,
}

pub struct App {
    pub is_running: bool,
    pub show_keyhints: bool,
    pub theme: Theme,
    pub config: UserConfig,
    pub state: PersistentState,
    pub remote_apps: Vec<String>,
    pub source: Option<MediaSource>,
    pub playhead: Rc<RefCell<Playhead>>,
    pub track: TrackView,
    pub toast: Option<Toast>,
    /// Where `state` is written; nothing is persisted when unset
    state_path: Option<PathBuf>,
    player: Option<Box<dyn PlayerTrait>>,
    observers: Vec<ObserverHandle>,
}

impl App {
    pub fn new(config: UserConfig, state: PersistentState, remote_apps: Vec<String>) -> Self {
        Self {
            is_running: true,
            show_keyhints: false,
            theme: Theme::default(),
            config,
            state,
            remote_apps,
            source: None,
            playhead: Rc::new(RefCell::new(Playhead::default())),
            track: TrackView::default(),
            toast: None,
            state_path: None,
            player: None,
            observers: Vec::new(),
        }
    }

    pub fn with_state_path(mut self, path: PathBuf) -> Self {
        self.state_path = Some(path);
        self
    }

    pub fn player(&self) -> Option<&dyn PlayerTrait> {
        self.player.as_deref()
    }

    pub fn is_remote(&self) -> bool {
        self.player().is_some_and(|p| p.is_remote_controlled())
    }

    /// Opens `source` and makes it the active player. Returns false (with a
    /// toast) if it could not be opened; the previous player keeps playing.
    pub fn open(&mut self, source: MediaSource) -> bool {
        match open_player(&source) {
            Ok(player) => {
                info!(source = %source, remote = player.is_remote_controlled(), "player selected");
                self.attach(source, player);
                true
            }
            Err(e) => {
                error!(source = %source, error = %e, "could not open");
                self.show_toast(&format!("❌ {}", e));
                false
            }
        }
    }

    /// Installs `player`, dropping the previous one and its observers.
    pub fn attach(&mut self, source: MediaSource, mut player: Box<dyn PlayerTrait>) {
        self.detach();

        let interval = Duration::from_millis(self.config.observer_interval_ms);
        let playhead = self.playhead.clone();
        self.observers.push(player.add_periodic_time_observer(
            interval,
            Box::new(move |time| {
                let mut p = playhead.borrow_mut();
                p.position = time;
                p.dirty = true;
            }),
        ));
        let playhead = self.playhead.clone();
        self.observers
            .push(player.add_state_observer(Box::new(move |change| {
                let mut p = playhead.borrow_mut();
                match change {
                    StateChange::Status(s) => p.status = s,
                    StateChange::Rate(r) => p.rate = r,
                    StateChange::TimeControl(t) => p.time_control = t,
                }
                p.dirty = true;
            })));

        {
            let mut p = self.playhead.borrow_mut();
            *p = Playhead {
                position: MediaTime::ZERO,
                time_control: player.time_control_status(),
                status: player.status(),
                rate: player.rate(),
                dirty: true,
            };
        }

        if !player.is_remote_controlled() {
            player.set_volume(self.state.volume);
            player.play();
        }

        self.state.last_source = Some(source.to_string());
        self.source = Some(source);
        self.player = Some(player);
        self.refresh_track();
    }

    fn detach(&mut self) {
        if let Some(mut old) = self.player.take() {
            for handle in self.observers.drain(..) {
                old.remove_observer(handle);
            }
        }
        self.observers.clear();
        self.track = TrackView::default();
    }

    /// Re-reads metadata, duration and volume from the player.
    pub fn refresh_track(&mut self) {
        self.playhead.borrow_mut().dirty = false;
        let Some(player) = self.player.as_deref() else {
            self.track = TrackView::default();
            return;
        };
        let metadata = player.current_metadata();
        let text = |key| lookup(&metadata, key).unwrap_or_default().to_string();
        self.track = TrackView {
            title: text(MetadataKey::Title),
            artist: text(MetadataKey::Artist),
            album: text(MetadataKey::AlbumName),
            duration: player.current_duration(),
            volume: player.volume(),
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.config.keys.action_for(key) {
            self.handle(action);
        }
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => self.is_running = false,
            Action::ToggleKeyhints => self.show_keyhints = !self.show_keyhints,
            Action::SelectRemote(index) => match self.remote_apps.get(index).cloned() {
                Some(app) => {
                    if self.open(MediaSource::remote(app.clone())) {
                        self.show_toast(&format!("🎛 Controlling {}", app));
                    }
                }
                None => self.show_toast("No remote app on that key"),
            },
            _ => self.transport(action),
        }
    }

    fn transport(&mut self, action: Action) {
        let seek_step = self.config.seek_step_secs;
        let volume_step = self.config.volume_step;
        let position = self.playhead.borrow().position;
        let playing = self.playhead.borrow().time_control == PlaybackState::Playing;
        let Some(player) = self.player.as_deref_mut() else {
            return;
        };

        match action {
            Action::PlayPause if playing => player.pause(),
            Action::PlayPause => player.play(),
            Action::NextTrack => player.next_track(),
            Action::PrevTrack => player.previous_track(),
            Action::SeekForward | Action::SeekBackward => {
                let delta = if action == Action::SeekForward {
                    seek_step
                } else {
                    -seek_step
                };
                let mut target = (position.seconds() + delta).max(0.0);
                if let Some(d) = player.current_duration().filter(|d| !d.is_indefinite()) {
                    target = target.min(d.seconds());
                }
                let target = MediaTime::from_secs_f64(target);
                player.seek(target);
                self.playhead.borrow_mut().position = target;
            }
            Action::VolumeUp | Action::VolumeDown => {
                let delta = if action == Action::VolumeUp {
                    volume_step
                } else {
                    -volume_step
                };
                let volume = (player.volume() + delta).clamp(0.0, 1.0);
                player.set_volume(volume);
                self.state.volume = volume;
                self.save_state();
            }
            Action::Quit | Action::ToggleKeyhints | Action::SelectRemote(_) => {}
        }
        self.refresh_track();
    }

    /// Earliest of the player's timer and the toast expiry.
    pub fn next_deadline(&self) -> Option<Instant> {
        let player = self.player.as_ref().and_then(|p| p.next_deadline());
        let toast = self.toast.as_ref().map(|t| t.deadline);
        match (player, toast) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(player) = self.player.as_deref_mut() {
            player.tick(now);
        }
        if self.toast.as_ref().is_some_and(|t| now >= t.deadline) {
            self.toast = None;
        }
        if self.playhead.borrow().dirty {
            self.refresh_track();
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast {
            message: message.to_string(),
            deadline: Instant::now() + TOAST_DURATION,
        });
    }

    /// Position as a fraction of the duration, when the duration is known.
    pub fn progress(&self) -> Option<f64> {
        let duration = self.track.duration.filter(|d| !d.is_indefinite())?;
        if duration.seconds() <= 0.0 {
            return None;
        }
        Some((self.playhead.borrow().position.seconds() / duration.seconds()).clamp(0.0, 1.0))
    }

    pub fn save_state(&self) {
        if let Some(path) = &self.state_path {
            self.state.save_to(path);
        }
    }
}
