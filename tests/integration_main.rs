use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use audion::app::config::{PersistentState, UserConfig};
use audion::app::keys::Action;
use audion::app::App;
use audion::bridge::{BridgeError, ScriptBridge, ScriptValue};
use audion::player::{MediaSource, MediaTime, PlaybackState, PlayerStatus, ScriptedRemotePlayer};

/// Stands in for a running application: fixed answers by script fragment.
#[derive(Default)]
struct FakeApp {
    answers: RefCell<Vec<(&'static str, ScriptValue)>>,
    log: RefCell<Vec<String>>,
}

impl FakeApp {
    fn answer(&self, fragment: &'static str, value: ScriptValue) {
        let mut answers = self.answers.borrow_mut();
        answers.retain(|(f, _)| *f != fragment);
        answers.push((fragment, value));
    }

    fn count(&self, fragment: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|s| s.contains(fragment))
            .count()
    }

    fn ran(&self, script: &str) -> bool {
        self.log.borrow().iter().any(|s| s.ends_with(script))
    }
}

impl ScriptBridge for FakeApp {
    fn execute(&self, source: &str) -> Result<ScriptValue, BridgeError> {
        self.log.borrow_mut().push(source.to_string());
        self.answers
            .borrow()
            .iter()
            .find(|(f, _)| source.contains(f))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| BridgeError::Parse("no answer".into()))
    }
}

/// A Spotify session: playing "Song A", 215 s long (reported in ms).
fn spotify() -> Rc<FakeApp> {
    let fake = Rc::new(FakeApp::default());
    fake.answer("get the player state", ScriptValue::Text("kPSP".into()));
    fake.answer("get the player position", ScriptValue::Real(42.5));
    fake.answer("get the duration", ScriptValue::Integer(215_000));
    fake.answer("get the sound volume", ScriptValue::Integer(50));
    fake.answer(
        "get {the name",
        ScriptValue::List(vec![
            ScriptValue::Text("Song A".into()),
            ScriptValue::Text("Artist A".into()),
            ScriptValue::Text("Album A".into()),
        ]),
    );
    fake
}

fn create_test_app() -> App {
    App::new(UserConfig::default(), PersistentState::default(), Vec::new())
}

fn attach(app: &mut App, name: &str, fake: &Rc<FakeApp>) {
    let player = ScriptedRemotePlayer::with_bridge(name, fake.clone());
    app.attach(MediaSource::remote(name), Box::new(player));
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

#[test]
fn test_app_initialization() {
    let app = create_test_app();
    assert!(app.is_running);
    assert!(!app.show_keyhints);
    assert!(app.player().is_none());
    assert!(app.next_deadline().is_none());
    assert_eq!(app.progress(), None);
}

#[test]
fn test_attach_remote_shows_track() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);

    assert!(app.is_remote());
    assert_eq!(app.track.title, "Song A");
    assert_eq!(app.track.artist, "Artist A");
    assert_eq!(app.track.album, "Album A");
    assert_eq!(app.track.duration, Some(MediaTime::from_secs_f64(215.0)));
    assert_eq!(app.track.volume, 0.5);
    assert_eq!(app.state.last_source.as_deref(), Some("osascript:Spotify"));
    // Remote apps keep their own volume
    assert!(!fake.ran("set the sound volume to 50"));
}

#[test]
fn test_play_updates_playhead_immediately() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);

    app.handle(Action::PlayPause);

    assert!(fake.ran("to play"));
    let playhead = app.playhead.borrow();
    assert_eq!(playhead.time_control, PlaybackState::Playing);
    assert_eq!(playhead.status, PlayerStatus::ReadyToPlay);
    assert_eq!(playhead.rate, 1.0);
    assert_eq!(playhead.position, MediaTime::from_secs_f64(42.5));
}

#[test]
fn test_play_pause_toggles_on_observed_state() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);

    app.handle(Action::PlayPause);
    assert_eq!(fake.count("to pause"), 0);

    fake.answer("get the player state", ScriptValue::Text("kPSp".into()));
    app.handle(Action::PlayPause);
    assert_eq!(fake.count("to pause"), 1);
    assert_eq!(app.playhead.borrow().time_control, PlaybackState::Paused);
}

#[test]
fn test_volume_keys_drive_remote_volume() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);

    app.handle_key(key('+'));
    assert!(fake.ran("set the sound volume to 55"));
    assert!((app.state.volume - 0.55).abs() < 1e-6);

    app.handle_key(key('-'));
    assert!(fake.ran("set the sound volume to 45"));
}

#[test]
fn test_volume_change_is_saved_immediately() {
    let dir = std::env::temp_dir().join(format!("audion-state-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("state.toml");

    let fake = spotify();
    let mut app = create_test_app().with_state_path(path.clone());
    attach(&mut app, "Spotify", &fake);
    app.handle_key(key('+'));

    let saved = PersistentState::from_toml(&std::fs::read_to_string(&path).unwrap());
    assert!((saved.volume - 0.55).abs() < 1e-6);
    assert_eq!(saved.last_source.as_deref(), Some("osascript:Spotify"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_seek_is_clamped_to_track() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);

    app.handle(Action::SeekBackward);
    assert!(fake.ran("set the player position to 0"));
    assert_eq!(app.playhead.borrow().position, MediaTime::ZERO);

    app.playhead.borrow_mut().position = MediaTime::from_secs_f64(213.0);
    app.handle(Action::SeekForward);
    assert!(fake.ran("set the player position to 215"));
    assert_eq!(app.progress(), Some(1.0));
}

#[test]
fn test_next_track_refreshes_metadata() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);

    fake.answer(
        "get {the name",
        ScriptValue::List(vec![
            ScriptValue::Text("Song B".into()),
            ScriptValue::Text("Artist B".into()),
            ScriptValue::Text("Album B".into()),
        ]),
    );
    app.handle_key(key('n'));

    assert!(fake.ran("next track"));
    assert_eq!(app.track.title, "Song B");
}

#[test]
fn test_poll_deadline_after_attach() {
    let fake = spotify();
    let mut app = create_test_app();
    let before = Instant::now();
    attach(&mut app, "Spotify", &fake);
    let after = Instant::now();

    let deadline = app.next_deadline().expect("remote player polls");
    assert!(deadline >= before + Duration::from_millis(100));
    assert!(deadline <= after + Duration::from_millis(100));
}

#[test]
fn test_tick_polls_and_marks_track_fresh() {
    let fake = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &fake);
    let polls = fake.count("get the player position");

    app.tick(Instant::now() + Duration::from_millis(150));

    assert_eq!(fake.count("get the player position"), polls + 1);
    let playhead = app.playhead.borrow();
    assert_eq!(playhead.position, MediaTime::from_secs_f64(42.5));
    assert!(!playhead.dirty);
}

#[test]
fn test_reattach_stops_old_player() {
    let old = spotify();
    let new = spotify();
    let mut app = create_test_app();
    attach(&mut app, "Spotify", &old);
    attach(&mut app, "Music", &new);

    let old_polls = old.count("get the player position");
    app.tick(Instant::now() + Duration::from_secs(1));

    assert_eq!(old.count("get the player position"), old_polls);
    assert!(new.count("get the player position") > 0);
    assert_eq!(app.source, Some(MediaSource::remote("Music")));
}

#[test]
fn test_unknown_remote_key_shows_toast() {
    let mut app = create_test_app();
    app.handle_key(key('4'));
    let toast = app.toast.as_ref().expect("toast shown");
    assert_eq!(toast.message, "No remote app on that key");

    // The toast expires on a later tick
    let deadline = app.next_deadline().expect("toast deadline");
    app.tick(deadline);
    assert!(app.toast.is_none());
}

#[test]
fn test_failed_open_keeps_nothing_open() {
    let mut app = create_test_app();
    let opened = app.open(MediaSource::File("/definitely/not/here.flac".into()));
    assert!(!opened);
    assert!(app.player().is_none());
    assert!(app.toast.is_some());
}

#[test]
fn test_keyhints_and_quit_keys() {
    let mut app = create_test_app();
    app.handle_key(key('?'));
    assert!(app.show_keyhints);
    app.handle_key(key('q'));
    assert!(!app.is_running);
}
